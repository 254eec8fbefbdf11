//! 请求边界：一次性把外部标识解析为内部 ID。

use crate::error::EditError;
use api_contract::AccessCodeEditRequest;
use domain::{AccountId, UnitId};

/// 已解析的修改指令。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditCommand {
    pub account_id: AccountId,
    /// 数字 ID 在前，外部标识解析结果在后，保持输入顺序。
    pub unit_ids: Vec<UnitId>,
    pub access_code: String,
}

impl TryFrom<AccessCodeEditRequest> for EditCommand {
    type Error = EditError;

    fn try_from(request: AccessCodeEditRequest) -> Result<Self, Self::Error> {
        let account_id = match request.account_external_id.as_deref() {
            Some(external) if !external.is_empty() => parse_identifier(external)?,
            _ => request.account_id.ok_or_else(|| {
                EditError::BadRequest("account identifier required".to_string())
            })?,
        };
        let mut unit_ids = request.unit_ids;
        for external in &request.unit_external_ids {
            unit_ids.push(parse_identifier(external)?);
        }
        Ok(Self {
            account_id,
            unit_ids,
            access_code: request.access_code,
        })
    }
}

fn parse_identifier(value: &str) -> Result<i64, EditError> {
    value
        .parse::<i64>()
        .map_err(|_| EditError::BadRequest(format!("invalid identifier: {}", value)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> AccessCodeEditRequest {
        AccessCodeEditRequest {
            access_code: "4321".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn external_account_id_takes_precedence() {
        let command = EditCommand::try_from(AccessCodeEditRequest {
            account_id: Some(5),
            account_external_id: Some("11".to_string()),
            ..request()
        })
        .expect("command");
        assert_eq!(command.account_id, 11);
    }

    #[test]
    fn empty_external_account_falls_back_to_numeric() {
        let command = EditCommand::try_from(AccessCodeEditRequest {
            account_id: Some(5),
            account_external_id: Some(String::new()),
            ..request()
        })
        .expect("command");
        assert_eq!(command.account_id, 5);
    }

    #[test]
    fn unit_external_ids_follow_numeric_ids() {
        let command = EditCommand::try_from(AccessCodeEditRequest {
            account_id: Some(5),
            unit_ids: vec![42, 0],
            unit_external_ids: vec!["43".to_string()],
            ..request()
        })
        .expect("command");
        assert_eq!(command.unit_ids, vec![42, 0, 43]);
    }

    #[test]
    fn missing_account_is_bad_request() {
        let err = EditCommand::try_from(request()).expect_err("missing");
        assert_eq!(
            err,
            EditError::BadRequest("account identifier required".to_string())
        );
    }

    #[test]
    fn non_numeric_identifier_is_bad_request() {
        let err = EditCommand::try_from(AccessCodeEditRequest {
            account_id: Some(5),
            unit_external_ids: vec!["unit-a".to_string()],
            ..request()
        })
        .expect_err("invalid");
        assert_eq!(
            err,
            EditError::BadRequest("invalid identifier: unit-a".to_string())
        );
    }
}
