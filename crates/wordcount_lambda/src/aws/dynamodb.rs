use std::collections::HashMap;

use aws_sdk_dynamodb::error::DisplayErrorContext;
use aws_sdk_dynamodb::types::{AttributeValue, PutRequest, WriteRequest};
use wordcount_core::contract::{TopWordEntry, WordCountRecord};
use wordcount_core::records::{
    ATTR_COUNT, ATTR_ORIGINAL_FILENAME, ATTR_SHARDED_USERNAME, ATTR_UPLOAD_DATE, ATTR_USERNAME,
    ATTR_UUID, ATTR_UUID_WORD, ATTR_WORD,
};

use crate::adapters::table::{BatchWriteOutcome, WordCountIndex, WordCountTable};
use crate::adapters::AdapterError;

use super::block_on;

/// DynamoDB accepts at most 25 put requests per `BatchWriteItem`.
const MAX_BATCH_WRITE_ITEMS: usize = 25;

pub struct DynamoWordCountTable {
    client: aws_sdk_dynamodb::Client,
    table_name: String,
    index_name: String,
}

impl DynamoWordCountTable {
    pub fn new(
        client: aws_sdk_dynamodb::Client,
        table_name: impl Into<String>,
        index_name: impl Into<String>,
    ) -> Self {
        Self {
            client,
            table_name: table_name.into(),
            index_name: index_name.into(),
        }
    }
}

impl WordCountTable for DynamoWordCountTable {
    fn batch_put(&self, records: &[WordCountRecord]) -> Result<BatchWriteOutcome, AdapterError> {
        let mut outcome = BatchWriteOutcome::default();

        for chunk in records.chunks(MAX_BATCH_WRITE_ITEMS) {
            let requests = chunk
                .iter()
                .map(|record| {
                    PutRequest::builder()
                        .set_item(Some(record_to_item(record)))
                        .build()
                        .map(|put| WriteRequest::builder().put_request(put).build())
                        .map_err(|error| {
                            AdapterError::Table(format!("invalid put request: {error}"))
                        })
                })
                .collect::<Result<Vec<_>, _>>()?;

            let output = block_on(
                self.client
                    .batch_write_item()
                    .request_items(&self.table_name, requests)
                    .send(),
            )
            .map_err(|error| {
                AdapterError::Table(format!(
                    "batch write to {} failed: {}",
                    self.table_name,
                    DisplayErrorContext(&error)
                ))
            })?;

            let unprocessed: usize = output
                .unprocessed_items()
                .map(|tables| tables.values().map(Vec::len).sum())
                .unwrap_or(0);
            outcome.unprocessed += unprocessed;
            outcome.written += chunk.len() - unprocessed;
        }

        Ok(outcome)
    }
}

impl WordCountIndex for DynamoWordCountTable {
    fn top_for_word(&self, word: &str, limit: i32) -> Result<Vec<TopWordEntry>, AdapterError> {
        let output = block_on(
            self.client
                .query()
                .table_name(&self.table_name)
                .index_name(&self.index_name)
                .key_condition_expression("#word = :word")
                .expression_attribute_names("#word", ATTR_WORD)
                .expression_attribute_values(":word", AttributeValue::S(word.to_string()))
                .scan_index_forward(false)
                .limit(limit)
                .send(),
        )
        .map_err(|error| {
            AdapterError::Table(format!(
                "query on {} failed: {}",
                self.index_name,
                DisplayErrorContext(&error)
            ))
        })?;

        output.items().iter().map(item_to_entry).collect()
    }
}

pub fn record_to_item(record: &WordCountRecord) -> HashMap<String, AttributeValue> {
    HashMap::from([
        (
            ATTR_SHARDED_USERNAME.to_string(),
            AttributeValue::S(record.sharded_username.clone()),
        ),
        (
            ATTR_UUID_WORD.to_string(),
            AttributeValue::S(record.uuid_word.clone()),
        ),
        (ATTR_UUID.to_string(), AttributeValue::S(record.uuid.clone())),
        (ATTR_WORD.to_string(), AttributeValue::S(record.word.clone())),
        (
            ATTR_COUNT.to_string(),
            AttributeValue::N(record.count.to_string()),
        ),
        (
            ATTR_ORIGINAL_FILENAME.to_string(),
            AttributeValue::S(record.original_filename.clone()),
        ),
        (
            ATTR_USERNAME.to_string(),
            AttributeValue::S(record.username.clone()),
        ),
        (
            ATTR_UPLOAD_DATE.to_string(),
            AttributeValue::S(record.upload_date.clone()),
        ),
    ])
}

pub fn item_to_entry(item: &HashMap<String, AttributeValue>) -> Result<TopWordEntry, AdapterError> {
    let string = |name: &str| -> Result<String, AdapterError> {
        item.get(name)
            .and_then(|value| value.as_s().ok())
            .cloned()
            .ok_or_else(|| AdapterError::Table(format!("item is missing string attribute {name}")))
    };

    let count = item
        .get(ATTR_COUNT)
        .and_then(|value| value.as_n().ok())
        .ok_or_else(|| {
            AdapterError::Table(format!("item is missing number attribute {ATTR_COUNT}"))
        })?
        .parse::<u64>()
        .map_err(|error| AdapterError::Table(format!("item has invalid {ATTR_COUNT}: {error}")))?;

    Ok(TopWordEntry {
        word: string(ATTR_WORD)?,
        count,
        original_filename: string(ATTR_ORIGINAL_FILENAME)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_record() -> WordCountRecord {
        WordCountRecord {
            sharded_username: "anonymous#4".to_string(),
            uuid_word: "uploads/1234-doc1.txt#cat".to_string(),
            uuid: "uploads/1234-doc1.txt".to_string(),
            word: "cat".to_string(),
            count: 20,
            original_filename: "doc1.txt".to_string(),
            username: "anonymous".to_string(),
            upload_date: "2026-10-19".to_string(),
        }
    }

    #[test]
    fn item_uses_table_attribute_names() {
        let item = record_to_item(&sample_record());

        assert_eq!(item.len(), 8);
        assert_eq!(
            item.get("ShardedUsername"),
            Some(&AttributeValue::S("anonymous#4".to_string()))
        );
        assert_eq!(
            item.get("UUIDWord"),
            Some(&AttributeValue::S("uploads/1234-doc1.txt#cat".to_string()))
        );
        assert_eq!(item.get("Count"), Some(&AttributeValue::N("20".to_string())));
        assert_eq!(
            item.get("Username"),
            Some(&AttributeValue::S("anonymous".to_string()))
        );
    }

    #[test]
    fn index_item_maps_to_entry() {
        let item = record_to_item(&sample_record());

        let entry = item_to_entry(&item).expect("item should map");

        assert_eq!(
            entry,
            TopWordEntry {
                word: "cat".to_string(),
                count: 20,
                original_filename: "doc1.txt".to_string(),
            }
        );
    }

    #[test]
    fn index_item_without_count_is_rejected() {
        let mut item = record_to_item(&sample_record());
        item.remove("Count");

        let error = item_to_entry(&item).expect_err("missing count should fail");
        assert!(error.to_string().contains("Count"));
    }
}
