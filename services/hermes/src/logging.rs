//! Console logging for hermes.
//!
//! Log lines read `[timestamp] [service] [level] message fields`, where
//! `service` is `hermes-<component>` when the event carries a `component`
//! field.

use std::fmt::{self, Write as _};
use tracing::{Event, Subscriber};
use tracing_subscriber::fmt::{format::Writer, FmtContext, FormatEvent, FormatFields};
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::EnvFilter;

const COLOR_RESET: &str = "\x1b[0m";
const COLOR_CYAN: &str = "\x1b[36m";
const COLOR_GREEN: &str = "\x1b[32m";
const COLOR_BRIGHT_YELLOW: &str = "\x1b[93m";
const COLOR_BRIGHT_RED: &str = "\x1b[91m";
const COLOR_BRIGHT_GRAY: &str = "\x1b[90m";

const SERVICE_NAME_WIDTH: usize = 20;
const LOG_LEVEL_WIDTH: usize = 7;

/// Event formatter with fixed-width service and level columns
pub struct HermesLogFormatter {
    service_name: String,
    color_enabled: bool,
}

impl HermesLogFormatter {
    /// Create a formatter for `service_name`
    pub fn new(service_name: String) -> Self {
        let color_enabled = is_terminal();
        Self {
            service_name,
            color_enabled,
        }
    }

    /// Disable ANSI colors
    pub fn without_color(mut self) -> Self {
        self.color_enabled = false;
        self
    }

    fn format_service_name(&self, component: Option<&str>) -> String {
        let name = match component {
            Some(comp) => format!("hermes-{}", comp),
            None => self.service_name.clone(),
        };

        if name.chars().count() > SERVICE_NAME_WIDTH {
            let truncated: String = name.chars().take(SERVICE_NAME_WIDTH - 1).collect();
            format!("{}…", truncated)
        } else {
            format!("{:<width$}", name, width = SERVICE_NAME_WIDTH)
        }
    }

    fn format_log_level(&self, level: &tracing::Level) -> String {
        let level_str = match *level {
            tracing::Level::ERROR => "✗ ERROR",
            tracing::Level::WARN => "⚠ WARN",
            tracing::Level::INFO => "ℹ INFO",
            tracing::Level::DEBUG => "◦ DEBUG",
            tracing::Level::TRACE => "◦ TRACE",
        };

        format!("{:<width$}", level_str, width = LOG_LEVEL_WIDTH + 2)
    }

    fn color_for_level(&self, level: &tracing::Level) -> &'static str {
        if !self.color_enabled {
            return "";
        }

        match *level {
            tracing::Level::ERROR => COLOR_BRIGHT_RED,
            tracing::Level::WARN => COLOR_BRIGHT_YELLOW,
            tracing::Level::INFO => COLOR_GREEN,
            tracing::Level::DEBUG | tracing::Level::TRACE => COLOR_BRIGHT_GRAY,
        }
    }
}

impl<S, N> FormatEvent<S, N> for HermesLogFormatter
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        _ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> fmt::Result {
        let timestamp = chrono::Local::now().format("%Y-%m-%d %H:%M:%S%.3f");
        let level = event.metadata().level();

        let mut visitor = FieldVisitor::default();
        event.record(&mut visitor);

        let service = self.format_service_name(visitor.component.as_deref());
        let formatted_level = self.format_log_level(level);

        let color = self.color_for_level(level);
        let reset = if self.color_enabled { COLOR_RESET } else { "" };
        let cyan = if self.color_enabled { COLOR_CYAN } else { "" };

        write!(
            writer,
            "{}[{}] [{}] [{}{}{}] ",
            cyan, timestamp, service, color, formatted_level, reset
        )?;
        writeln!(writer, "{}{}{}", visitor.message, visitor.fields, reset)
    }
}

/// Collects the message, the component and every other field of an event
#[derive(Default)]
struct FieldVisitor {
    message: String,
    component: Option<String>,
    fields: String,
}

impl tracing::field::Visit for FieldVisitor {
    fn record_str(&mut self, field: &tracing::field::Field, value: &str) {
        match field.name() {
            "message" => self.message = value.to_string(),
            "component" => self.component = Some(value.to_string()),
            name => {
                let _ = write!(self.fields, " {}={}", name, value);
            }
        }
    }

    fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn fmt::Debug) {
        match field.name() {
            "message" => self.message = format!("{:?}", value),
            "component" => {
                self.component = Some(format!("{:?}", value).trim_matches('"').to_string())
            }
            name => {
                let _ = write!(self.fields, " {}={:?}", name, value);
            }
        }
    }
}

fn is_terminal() -> bool {
    matches!(std::env::var("TERM"), Ok(term) if term != "dumb")
}

/// Install the hermes formatter as the global subscriber.
///
/// `RUST_LOG` takes precedence over `default_level`. Fails if a global
/// subscriber is already set.
pub fn init(service_name: &str, default_level: &str) -> anyhow::Result<()> {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_level))?;

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .event_format(HermesLogFormatter::new(service_name.to_string()))
        .try_init()
        .map_err(|err| anyhow::anyhow!("failed to install subscriber: {}", err))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Default)]
    struct Captured(Arc<Mutex<Vec<u8>>>);

    impl Captured {
        fn contents(&self) -> String {
            String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
        }
    }

    impl io::Write for Captured {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    fn capturing_subscriber(captured: Captured) -> impl Subscriber + Send + Sync {
        tracing_subscriber::fmt()
            .with_max_level(tracing::Level::TRACE)
            .event_format(HermesLogFormatter::new("hermes".to_string()).without_color())
            .with_writer(move || captured.clone())
            .finish()
    }

    #[test]
    fn test_renders_component_event() {
        let captured = Captured::default();
        tracing::subscriber::with_default(capturing_subscriber(captured.clone()), || {
            tracing::warn!(
                component = "formatter",
                message_type = "PublishAck",
                "rejecting message"
            );
        });

        let line = captured.contents();
        assert!(line.contains("] [hermes-formatter    ] ["), "{}", line);
        assert!(line.contains("⚠ WARN"), "{}", line);
        assert!(
            line.ends_with("] rejecting message message_type=PublishAck\n"),
            "{}",
            line
        );
        assert!(!line.contains("component="), "{}", line);
        assert!(!line.contains('\x1b'), "{}", line);
    }

    #[test]
    fn test_renders_event_without_component() {
        let captured = Captured::default();
        tracing::subscriber::with_default(capturing_subscriber(captured.clone()), || {
            tracing::info!(formatters = 9, "packet pipeline ready");
        });

        let line = captured.contents();
        assert!(line.contains("] [hermes              ] ["), "{}", line);
        assert!(line.contains("ℹ INFO"), "{}", line);
        assert!(line.ends_with("packet pipeline ready formatters=9\n"), "{}", line);
    }

    #[tokio::test]
    async fn test_renders_packet_manager_rejection() {
        let captured = Captured::default();
        let _guard = tracing::subscriber::set_default(capturing_subscriber(captured.clone()));

        let pipeline = crate::build_pipeline(&crate::HermesConfig::default()).unwrap();
        assert!(pipeline.manager.manage_packet(&[0x10, 0x00]).await.is_err());

        let output = captured.contents();
        let line = output
            .lines()
            .find(|line| line.contains("no formatter registered"))
            .unwrap_or_else(|| panic!("missing rejection line in {}", output));
        assert!(line.contains("[hermes-packets"), "{}", line);
        assert!(line.contains("⚠ WARN"), "{}", line);
        assert!(line.ends_with("no formatter registered message_type=Connect"), "{}", line);
    }

    #[test]
    fn test_service_name_column() {
        let formatter = HermesLogFormatter::new("hermes".to_string()).without_color();
        assert_eq!(formatter.format_service_name(None).len(), SERVICE_NAME_WIDTH);
        assert!(formatter
            .format_service_name(Some("formatter"))
            .starts_with("hermes-formatter"));

        let long = formatter.format_service_name(Some("a-very-long-component-name"));
        assert_eq!(long.chars().count(), SERVICE_NAME_WIDTH);
        assert!(long.ends_with('…'));
    }

    #[test]
    fn test_level_column() {
        let formatter = HermesLogFormatter::new("hermes".to_string()).without_color();
        assert!(formatter
            .format_log_level(&tracing::Level::WARN)
            .starts_with("⚠ WARN"));
        assert_eq!(formatter.color_for_level(&tracing::Level::ERROR), "");
    }

    #[test]
    fn test_init_twice_fails() {
        let _ = init("hermes", "debug");
        assert!(init("hermes", "debug").is_err());
    }
}
