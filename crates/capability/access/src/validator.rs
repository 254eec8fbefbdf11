//! 候选门禁密码校验。

use domain::{GateAccessCode, ValidationMessage};
use gate_storage::{AccessCodeStore, StorageError};
use std::sync::Arc;

/// 格式规则。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AccessCodeRules {
    pub min_length: usize,
    pub max_length: usize,
}

impl Default for AccessCodeRules {
    fn default() -> Self {
        Self {
            min_length: 4,
            max_length: 12,
        }
    }
}

impl AccessCodeRules {
    pub fn new(min_length: usize, max_length: usize) -> Self {
        Self {
            min_length,
            max_length,
        }
    }

    /// 只检查格式，不访问存储。
    pub fn check_format(&self, code: &str) -> Vec<ValidationMessage> {
        if code.trim().is_empty() {
            return vec![ValidationMessage::Empty];
        }
        let mut messages = Vec::new();
        if !code.chars().all(|ch| ch.is_ascii_digit()) {
            messages.push(ValidationMessage::NonNumeric);
        }
        let length = code.chars().count();
        if length < self.min_length || length > self.max_length {
            messages.push(ValidationMessage::InvalidLength);
        }
        messages
    }
}

/// 门禁密码校验器。
pub struct AccessCodeValidator {
    store: Arc<dyn AccessCodeStore>,
    rules: AccessCodeRules,
}

impl AccessCodeValidator {
    pub fn new(store: Arc<dyn AccessCodeStore>, rules: AccessCodeRules) -> Self {
        Self { store, rules }
    }

    pub fn rules(&self) -> AccessCodeRules {
        self.rules
    }

    /// 填充 `is_valid` 与 `validation_messages`；仅存储失败返回 `Err`。
    pub async fn validate(&self, candidate: &mut GateAccessCode) -> Result<(), StorageError> {
        let mut messages = self.rules.check_format(&candidate.access_code);
        if messages.is_empty() {
            let existing = self
                .store
                .get_codes_for_units(&[candidate.unit_id], candidate.site_id)
                .await?;
            let duplicate = existing.iter().any(|code| {
                code.unit_id == candidate.unit_id
                    && code.account_id != candidate.account_id
                    && code.access_code == candidate.access_code
                    && code.state.is_live()
            });
            if duplicate {
                messages.push(ValidationMessage::Duplicate);
            }
        }
        candidate.is_valid = messages.is_empty();
        candidate.validation_messages = messages;
        Ok(())
    }
}
