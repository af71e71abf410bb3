use async_trait::async_trait;
use metrics::counter;
use tracing::info;

use crate::error::SinkError;
use crate::event::Fields;
use crate::sinks::EventSink;

/// Logs every event as a JSON document instead of shipping it anywhere.
pub struct PrintSink {}

#[async_trait]
impl EventSink for PrintSink {
    async fn write(&self, fields: &Fields, msg: &str) -> Result<(), SinkError> {
        let payload = serde_json::to_string(fields)?;
        info!(fields = %payload, msg, "event");
        counter!("eventrouter_print_sink_events_total").increment(1);

        Ok(())
    }
}
