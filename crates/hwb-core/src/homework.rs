//! Review API response validation and status formatting.
//!
//! The API returns `{ "homeworks": [...], "current_date": <unix ts> }` with the
//! most recent homework first. Validation works on the raw JSON value so that
//! every shape problem maps onto a distinct [`Error`] kind.

use serde_json::Value;
use tracing::{debug, error};

use crate::{Error, Result};

/// Sent when the API reports no homework updates since the cursor.
pub const NO_NEW_STATUSES: &str = "Нет новых статусов работ.";

/// Review outcome reported by the API. Closed set: anything else is an error.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum HomeworkStatus {
    Approved,
    Reviewing,
    Rejected,
}

impl HomeworkStatus {
    pub const ALL: [HomeworkStatus; 3] = [
        HomeworkStatus::Approved,
        HomeworkStatus::Reviewing,
        HomeworkStatus::Rejected,
    ];

    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "approved" => Some(HomeworkStatus::Approved),
            "reviewing" => Some(HomeworkStatus::Reviewing),
            "rejected" => Some(HomeworkStatus::Rejected),
            _ => None,
        }
    }

    pub fn code(self) -> &'static str {
        match self {
            HomeworkStatus::Approved => "approved",
            HomeworkStatus::Reviewing => "reviewing",
            HomeworkStatus::Rejected => "rejected",
        }
    }

    pub fn verdict(self) -> &'static str {
        match self {
            HomeworkStatus::Approved => "Работа проверена: ревьюеру всё понравилось. Ура!",
            HomeworkStatus::Reviewing => "Работа взята на проверку ревьюером.",
            HomeworkStatus::Rejected => "Работа проверена: у ревьюера есть замечания.",
        }
    }
}

/// Check a raw API response and return its `homeworks` list, order preserved.
pub fn check_response(response: &Value) -> Result<&[Value]> {
    let Some(obj) = response.as_object() else {
        error!("API response is not an object: {}", type_name(response));
        return Err(Error::UnexpectedType(format!(
            "ответ API должен быть словарём, получено {}",
            type_name(response)
        )));
    };

    for key in ["homeworks", "current_date"] {
        if !obj.contains_key(key) {
            error!("API response has no `{key}` key");
            return Err(Error::MissingKey(key.to_string()));
        }
    }

    match &obj["homeworks"] {
        Value::Array(items) => {
            debug!("API response contains {} homeworks", items.len());
            Ok(items.as_slice())
        }
        other => {
            error!("`homeworks` is not a list: {}", type_name(other));
            Err(Error::UnexpectedType(format!(
                "homeworks должен быть списком, получено {}",
                type_name(other)
            )))
        }
    }
}

/// Server-reported time of the response, if present and integral.
pub fn current_date(response: &Value) -> Option<i64> {
    response.get("current_date").and_then(Value::as_i64)
}

/// Format one homework record as a status-change notification.
pub fn parse_status(homework: &Value) -> Result<String> {
    let name = match homework.get("homework_name") {
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
        None => return Err(Error::MissingKey("homework_name".to_string())),
    };

    let status = match homework.get("status") {
        Some(Value::String(code)) => HomeworkStatus::from_code(code)
            .ok_or_else(|| Error::UnknownStatus(code.clone()))?,
        Some(other) => return Err(Error::UnknownStatus(other.to_string())),
        None => return Err(Error::UnknownStatus("None".to_string())),
    };

    Ok(format!(
        "Изменился статус проверки работы \"{name}\". {}",
        status.verdict()
    ))
}

fn type_name(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "list",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn formats_every_known_status() {
        for status in HomeworkStatus::ALL {
            let hw = json!({"homework_name": "hw_bot", "status": status.code()});
            assert_eq!(
                parse_status(&hw).unwrap(),
                format!(
                    "Изменился статус проверки работы \"hw_bot\". {}",
                    status.verdict()
                )
            );
            assert_eq!(HomeworkStatus::from_code(status.code()), Some(status));
        }
    }

    #[test]
    fn approved_message_is_exact() {
        let hw = json!({"homework_name": "hw1", "status": "approved", "id": 7});
        assert_eq!(
            parse_status(&hw).unwrap(),
            "Изменился статус проверки работы \"hw1\". Работа проверена: ревьюеру всё понравилось. Ура!"
        );
    }

    #[test]
    fn unknown_or_missing_status_is_rejected() {
        for hw in [
            json!({"homework_name": "hw2", "status": "pending"}),
            json!({"homework_name": "hw2", "status": "APPROVED"}),
            json!({"homework_name": "hw2", "status": 1}),
            json!({"homework_name": "hw2"}),
        ] {
            assert!(
                matches!(parse_status(&hw), Err(Error::UnknownStatus(_))),
                "{hw}"
            );
        }

        let err = parse_status(&json!({"homework_name": "hw2", "status": "pending"})).unwrap_err();
        assert_eq!(err.to_string(), "Неизвестный статус работы - pending");
    }

    #[test]
    fn missing_name_wins_over_other_fields() {
        for hw in [
            json!({"status": "approved"}),
            json!({"status": "pending"}),
            json!({}),
            json!([]),
        ] {
            match parse_status(&hw) {
                Err(Error::MissingKey(key)) => assert_eq!(key, "homework_name"),
                other => panic!("unexpected result for {hw}: {other:?}"),
            }
        }
    }

    #[test]
    fn non_object_response_is_a_type_error() {
        for resp in [json!([]), json!("ok"), json!(null), json!(12)] {
            assert!(
                matches!(check_response(&resp), Err(Error::UnexpectedType(_))),
                "{resp}"
            );
        }
    }

    #[test]
    fn missing_keys_are_reported() {
        match check_response(&json!({"current_date": 1})) {
            Err(Error::MissingKey(key)) => assert_eq!(key, "homeworks"),
            other => panic!("unexpected: {other:?}"),
        }
        match check_response(&json!({"homeworks": []})) {
            Err(Error::MissingKey(key)) => assert_eq!(key, "current_date"),
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn homeworks_must_be_a_list() {
        let resp = json!({"homeworks": {"homework_name": "hw1"}, "current_date": 1});
        assert!(matches!(
            check_response(&resp),
            Err(Error::UnexpectedType(_))
        ));
    }

    #[test]
    fn returns_homeworks_in_order() {
        let resp = json!({
            "homeworks": [
                {"homework_name": "new", "status": "reviewing"},
                {"homework_name": "old", "status": "approved"}
            ],
            "current_date": 1700000000
        });
        let items = check_response(&resp).unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0]["homework_name"], "new");
        assert_eq!(current_date(&resp), Some(1700000000));
    }

    #[test]
    fn current_date_ignores_non_integers() {
        assert_eq!(current_date(&json!({"current_date": "soon"})), None);
        assert_eq!(current_date(&json!({})), None);
    }
}
