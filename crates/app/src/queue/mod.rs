mod consumer;
mod producer;

pub use consumer::AlertConsumer;
pub use producer::AlertProducer;
