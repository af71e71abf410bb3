use async_trait::async_trait;

use crate::error::SinkError;
use crate::event::Fields;

pub mod print;

#[async_trait]
pub trait EventSink {
    async fn write(&self, fields: &Fields, msg: &str) -> Result<(), SinkError>;
}
