use crate::config::LoggerDescriptor;
use crate::encoder::JsonEncoder;
use log4rs::append::console::ConsoleAppender;
use log4rs::append::rolling_file::policy::compound::{
    roll::fixed_window::FixedWindowRoller, trigger::size::SizeTrigger, CompoundPolicy,
};
use log4rs::append::rolling_file::RollingFileAppender;
use log4rs::config::{Appender, Root};
use log4rs::{Config as LogConfig, Handle};

pub const LOG_FILE_NAME: &str = "trace.log";

pub const ROLLED_LOG_FILE_NAME: &str = "trace.{}.log";

pub const ROLLED_LOG_FILE_COUNT: u32 = 5;

pub fn build_log_config(descriptor: &LoggerDescriptor) -> anyhow::Result<LogConfig> {
    let stdout = ConsoleAppender::builder()
        .encoder(Box::new(JsonEncoder::new()))
        .build();

    let mut log_config =
        LogConfig::builder().appender(Appender::builder().build("stdout", Box::new(stdout)));
    let mut root = Root::builder().appender("stdout");

    if let Some(log_file_path) = descriptor.get_log_file_path() {
        let roller = FixedWindowRoller::builder().build(
            &format!("{}/{}", log_file_path, ROLLED_LOG_FILE_NAME),
            ROLLED_LOG_FILE_COUNT,
        )?;
        let policy = CompoundPolicy::new(
            Box::new(SizeTrigger::new(descriptor.get_rolling_file_size())),
            Box::new(roller),
        );
        let file = RollingFileAppender::builder()
            .encoder(Box::new(JsonEncoder::new()))
            .build(
                format!("{}/{}", log_file_path, LOG_FILE_NAME),
                Box::new(policy),
            )?;

        log_config = log_config.appender(Appender::builder().build("file", Box::new(file)));
        root = root.appender("file");
    }

    Ok(log_config.build(root.build(descriptor.get_level()))?)
}

/// Installs the global logger. Fails if one is already installed.
pub fn init_log(descriptor: &LoggerDescriptor) -> anyhow::Result<Handle> {
    let log_config = build_log_config(descriptor)?;
    Ok(log4rs::init_config(log_config)?)
}
