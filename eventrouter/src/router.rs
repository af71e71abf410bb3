use std::sync::Arc;

use metrics::counter;
use tracing::{debug, error, instrument, warn};

use crate::builders::BuilderRegistry;
use crate::cache::AppCache;
use crate::envelope::Envelope;
use crate::error::{BuildError, ConfigError, SinkError};
use crate::event::{Event, FieldLookup, FieldValue, Fields, APP_ID_FIELD};
use crate::selection::{ExtraFields, SelectedEvents};
use crate::sinks::EventSink;

pub const WRITE_FAILURE_MESSAGE: &str = "Failed to write events";

/// The two option strings the router is built from.
#[derive(Debug, Clone, Default)]
pub struct RouterConfig {
    pub selected_events: String,
    pub extra_fields: String,
}

/// Filters, enriches and forwards envelopes to a sink.
///
/// Everything but the collaborators is fixed at construction, so a single
/// router can be shared between any number of concurrent callers.
#[derive(Clone)]
pub struct EventRouter {
    cache: Arc<dyn AppCache + Send + Sync>,
    sink: Arc<dyn EventSink + Send + Sync>,
    selected_events: SelectedEvents,
    extra_fields: ExtraFields,
    builders: BuilderRegistry,
}

impl EventRouter {
    pub fn new<C, S>(cache: C, sink: S, config: &RouterConfig) -> Result<Self, ConfigError>
    where
        C: AppCache + Send + Sync + 'static,
        S: EventSink + Send + Sync + 'static,
    {
        let selected_events = config.selected_events.parse()?;
        let extra_fields = config.extra_fields.parse()?;

        Ok(Self::from_parts(
            Arc::new(cache),
            Arc::new(sink),
            selected_events,
            extra_fields,
            BuilderRegistry::default(),
        ))
    }

    pub fn from_parts(
        cache: Arc<dyn AppCache + Send + Sync>,
        sink: Arc<dyn EventSink + Send + Sync>,
        selected_events: SelectedEvents,
        extra_fields: ExtraFields,
        builders: BuilderRegistry,
    ) -> Self {
        EventRouter {
            cache,
            sink,
            selected_events,
            extra_fields,
            builders,
        }
    }

    /// Routes a single envelope. Only a failed sink write is reported back;
    /// every other outcome, dropping the envelope included, is `Ok`.
    #[instrument(skip_all, fields(event_type = %envelope.event_type))]
    pub async fn route(&self, envelope: &Envelope) -> Result<(), SinkError> {
        counter!("eventrouter_events_received_total").increment(1);

        if !self.selected_events.accept(envelope.event_type.as_str()) {
            counter!("eventrouter_events_dropped_total", "reason" => "not_selected").increment(1);
            return Ok(());
        }

        let mut event = match self.builders.build(envelope) {
            Ok(event) => event,
            Err(BuildError::UnsupportedEventType(event_type)) => {
                warn!(%event_type, "dropping event with no registered builder");
                counter!("eventrouter_events_dropped_total", "reason" => "unsupported_type")
                    .increment(1);
                return Ok(());
            }
        };

        event.annotate_with_envelope_data(envelope);
        event.annotate_with_meta_data(&self.extra_fields);
        if event.contains(APP_ID_FIELD) {
            self.annotate_with_app_data(&mut event).await;
        }

        if event.is_ignored() {
            debug!("dropping event from ignored app");
            counter!("eventrouter_events_dropped_total", "reason" => "ignored_app").increment(1);
            return Ok(());
        }

        self.write(&event).await
    }

    async fn annotate_with_app_data(&self, event: &mut Event) {
        let app_id = match event.get_str(APP_ID_FIELD) {
            FieldLookup::Found(app_id) => app_id.to_owned(),
            FieldLookup::Missing | FieldLookup::Mismatch => String::new(),
        };

        match self.cache.get_app(&app_id).await {
            Ok(Some(app)) => {
                counter!("eventrouter_cache_lookups_total", "result" => "hit").increment(1);
                event.annotate_with_app_data(&app);
            }
            Ok(None) => {
                counter!("eventrouter_cache_lookups_total", "result" => "miss").increment(1);
            }
            Err(e) => {
                warn!(app_id = %app_id, "failed to fetch application metadata: {}", e);
                counter!("eventrouter_cache_lookups_total", "result" => "error").increment(1);
            }
        }
    }

    async fn write(&self, event: &Event) -> Result<(), SinkError> {
        match self.sink.write(&event.fields, &event.msg).await {
            Ok(()) => {
                counter!("eventrouter_events_written_total").increment(1);
                Ok(())
            }
            Err(e) => {
                error!("failed to write event: {}", e);
                counter!("eventrouter_sink_errors_total").increment(1);

                let mut fields = Fields::new();
                fields.insert("err".to_owned(), FieldValue::String(e.to_string()));
                if let Err(report_error) = self.sink.write(&fields, WRITE_FAILURE_MESSAGE).await {
                    error!("failed to report write failure: {}", report_error);
                }

                Err(e)
            }
        }
    }
}
