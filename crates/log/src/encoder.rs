//! A log4rs encoder writing one JSON object per line.
//!
//! ```json
//! {
//!     "time": "2016-03-20T14:22:20.644420340-08:00",
//!     "message": "Executing function login with args=[Arnold, **********] and kwargs={}",
//!     "level": "DEBUG",
//!     "target": "my_app::auth",
//!     "module_path": "my_app::auth",
//!     "file": "src/auth.rs",
//!     "line": 12,
//!     "thread": "main",
//!     "thread_id": 123,
//!     "fn_name": "login",
//!     "mdc": {
//!         "fn_name": "login"
//!     }
//! }
//! ```

use crate::tracer::FN_NAME_KEY;
use chrono::{
    format::{DelayedFormat, Fixed, Item},
    DateTime, Local,
};
use log::{Level, Record};
use log4rs::encode::{Encode, Write};
use serde::ser::{self, Serialize, SerializeMap};
use std::{fmt, option, thread};

#[derive(Clone, Debug, Default)]
pub struct JsonEncoder;

impl JsonEncoder {
    pub fn new() -> Self {
        JsonEncoder
    }

    fn encode_inner(
        &self,
        w: &mut dyn Write,
        time: DateTime<Local>,
        record: &Record,
    ) -> anyhow::Result<()> {
        let thread = thread::current();
        let fn_name = log_mdc::get(FN_NAME_KEY, |v| v.map(str::to_string));

        let message = Message {
            time: time.format_with_items(Some(Item::Fixed(Fixed::RFC3339)).into_iter()),
            message: record.args(),
            level: record.level(),
            target: record.target(),
            module_path: record.module_path(),
            file: record.file(),
            line: record.line(),
            thread: thread.name(),
            thread_id: thread_id::get(),
            fn_name: fn_name.as_deref(),
            mdc: Mdc,
        };
        message.serialize(&mut serde_json::Serializer::new(&mut *w))?;
        w.write_all("\n".as_bytes())?;
        Ok(())
    }
}

impl Encode for JsonEncoder {
    fn encode(&self, w: &mut dyn Write, record: &Record) -> anyhow::Result<()> {
        self.encode_inner(w, Local::now(), record)
    }
}

#[derive(serde::Serialize)]
struct Message<'a> {
    #[serde(serialize_with = "ser_display")]
    time: DelayedFormat<option::IntoIter<Item<'a>>>,
    #[serde(serialize_with = "ser_display")]
    message: &'a fmt::Arguments<'a>,
    level: Level,
    target: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    module_path: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    file: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    line: Option<u32>,
    thread: Option<&'a str>,
    thread_id: usize,
    fn_name: Option<&'a str>,
    mdc: Mdc,
}

fn ser_display<T, S>(v: &T, s: S) -> Result<S::Ok, S::Error>
where
    T: fmt::Display,
    S: ser::Serializer,
{
    s.collect_str(v)
}

struct Mdc;

impl ser::Serialize for Mdc {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: ser::Serializer,
    {
        let mut map = serializer.serialize_map(None)?;

        let mut err = Ok(());
        log_mdc::iter(|k, v| {
            if let Ok(()) = err {
                err = map.serialize_key(k).and_then(|()| map.serialize_value(v));
            }
        });
        err?;

        map.end()
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use log4rs::encode::writer::simple::SimpleWriter;
    use serde_json::{json, Value};

    fn encode(record: &Record) -> Value {
        let time = DateTime::parse_from_rfc3339("2016-03-20T14:22:20.644420340-08:00")
            .unwrap()
            .with_timezone(&Local);
        let mut buf = vec![];
        JsonEncoder::new()
            .encode_inner(&mut SimpleWriter(&mut buf), time, record)
            .unwrap();
        let line = String::from_utf8(buf).unwrap();
        assert!(line.ends_with('\n'));
        serde_json::from_str(line.trim()).unwrap()
    }

    #[test]
    fn test_traced_record() {
        let _fn_name = log_mdc::insert_scoped(FN_NAME_KEY, "login");
        let encoded = encode(
            &Record::builder()
                .level(Level::Debug)
                .target("my_app::auth")
                .module_path(Some("my_app::auth"))
                .file(Some("src/auth.rs"))
                .line(Some(12))
                .args(format_args!(
                    "Executing function login with args=[Arnold, **********] and kwargs={{}}"
                ))
                .build(),
        );

        assert_eq!(
            json!("Executing function login with args=[Arnold, **********] and kwargs={}"),
            encoded["message"]
        );
        assert_eq!(json!("DEBUG"), encoded["level"]);
        assert_eq!(json!("my_app::auth"), encoded["target"]);
        assert_eq!(json!("src/auth.rs"), encoded["file"]);
        assert_eq!(json!(12), encoded["line"]);
        assert_eq!(json!(thread_id::get()), encoded["thread_id"]);
        assert_eq!(json!("login"), encoded["fn_name"]);
        assert_eq!(json!({ "fn_name": "login" }), encoded["mdc"]);
        assert!(encoded["time"].as_str().unwrap().starts_with("2016-03-2"));
    }

    #[test]
    fn test_untraced_record() {
        let encoded = encode(
            &Record::builder()
                .level(Level::Info)
                .target("plain")
                .args(format_args!("hello"))
                .build(),
        );

        assert_eq!(json!("hello"), encoded["message"]);
        assert_eq!(Value::Null, encoded["fn_name"]);
        assert!(encoded.get("module_path").is_none());
        assert!(encoded.get("line").is_none());
    }
}
