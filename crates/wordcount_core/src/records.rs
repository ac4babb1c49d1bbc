use crate::contract::{WordCountMessage, WordCountRecord};

pub const ATTR_SHARDED_USERNAME: &str = "ShardedUsername";
pub const ATTR_UUID_WORD: &str = "UUIDWord";
pub const ATTR_UUID: &str = "UUID";
pub const ATTR_WORD: &str = "Word";
pub const ATTR_COUNT: &str = "Count";
pub const ATTR_ORIGINAL_FILENAME: &str = "OriginalFilename";
pub const ATTR_USERNAME: &str = "Username";
pub const ATTR_UPLOAD_DATE: &str = "UploadDate";

pub fn word_sort_key(s3_filename: &str, word: &str) -> String {
    format!("{s3_filename}#{word}")
}

/// One record per word of `message`, all under `partition_key`.
///
/// Counts are copied as received; the threshold is enforced by the producer.
pub fn build_records(message: &WordCountMessage, partition_key: &str) -> Vec<WordCountRecord> {
    message
        .frequent_words
        .iter()
        .map(|(word, count)| WordCountRecord {
            sharded_username: partition_key.to_string(),
            uuid_word: word_sort_key(&message.s3_filename, word),
            uuid: message.s3_filename.clone(),
            word: word.clone(),
            count: *count,
            original_filename: message.original_filename.clone(),
            username: message.username.clone(),
            upload_date: message.upload_date.clone(),
        })
        .collect()
}
