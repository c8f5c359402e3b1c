use log::{Level, LevelFilter, Log, Record};
use std::fmt;
use std::sync::Arc;

const TARGET: &str = "upbank";

#[derive(Clone)]
enum Sink {
    /// Whatever logger the process installed behind the `log` facade.
    Facade,
    Custom(Arc<dyn Log>),
}

/// Where a client sends its log records and how verbose it is.
#[derive(Clone)]
pub(crate) struct ClientLogger {
    sink: Sink,
    level: LevelFilter,
}

impl Default for ClientLogger {
    fn default() -> Self {
        Self {
            sink: Sink::Facade,
            level: LevelFilter::Info,
        }
    }
}

impl fmt::Debug for ClientLogger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sink = match self.sink {
            Sink::Facade => "facade",
            Sink::Custom(_) => "custom",
        };
        f.debug_struct("ClientLogger")
            .field("sink", &sink)
            .field("level", &self.level)
            .finish()
    }
}

impl ClientLogger {
    pub fn new(logger: Arc<dyn Log>) -> Self {
        Self {
            sink: Sink::Custom(logger),
            ..Self::default()
        }
    }

    pub fn with_level(mut self, level: LevelFilter) -> Self {
        self.level = level;
        self
    }

    pub fn level(&self) -> LevelFilter {
        self.level
    }

    pub(crate) fn log(&self, level: Level, args: fmt::Arguments<'_>) {
        if level > self.level {
            return;
        }
        let record = Record::builder()
            .args(args)
            .level(level)
            .target(TARGET)
            .module_path_static(Some(module_path!()))
            .build();
        match &self.sink {
            Sink::Facade => log::logger().log(&record),
            Sink::Custom(logger) => {
                if logger.enabled(record.metadata()) {
                    logger.log(&record);
                }
            }
        }
    }

    pub(crate) fn debug(&self, args: fmt::Arguments<'_>) {
        self.log(Level::Debug, args);
    }

    pub(crate) fn error(&self, args: fmt::Arguments<'_>) {
        self.log(Level::Error, args);
    }
}
