//! Data streams

use super::Batch;

/// A source of batches that can be iterated epoch by epoch
pub trait DataStream: Send {
    /// One full pass over the data
    fn epoch(&mut self) -> Box<dyn Iterator<Item = Batch> + '_>;
}

/// Stream that replays a fixed list of batches every epoch
#[derive(Clone, Debug, Default)]
pub struct InMemoryDataStream {
    batches: Vec<Batch>,
}

impl InMemoryDataStream {
    /// Create a stream over the given batches
    pub fn new(batches: Vec<Batch>) -> Self {
        Self { batches }
    }

    /// Number of batches per epoch
    pub fn len(&self) -> usize {
        self.batches.len()
    }

    /// Check if an epoch is empty
    pub fn is_empty(&self) -> bool {
        self.batches.is_empty()
    }
}

impl DataStream for InMemoryDataStream {
    fn epoch(&mut self) -> Box<dyn Iterator<Item = Batch> + '_> {
        Box::new(self.batches.iter().cloned())
    }
}

impl<S: DataStream + ?Sized> DataStream for Box<S> {
    fn epoch(&mut self) -> Box<dyn Iterator<Item = Batch> + '_> {
        (**self).epoch()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_in_memory_stream_replays_epochs() {
        let mut stream = InMemoryDataStream::new(vec![
            Batch::new().with_source("x", vec![1.0]),
            Batch::new().with_source("x", vec![2.0]),
        ]);
        assert_eq!(stream.len(), 2);
        assert_eq!(stream.epoch().count(), 2);
        assert_eq!(stream.epoch().count(), 2);
    }

    #[test]
    fn test_empty_stream() {
        let mut stream = InMemoryDataStream::default();
        assert!(stream.is_empty());
        assert_eq!(stream.epoch().count(), 0);
    }

    #[test]
    fn test_boxed_stream_delegates() {
        let mut stream: Box<dyn DataStream> =
            Box::new(InMemoryDataStream::new(vec![Batch::new()]));
        assert_eq!(stream.epoch().count(), 1);
    }
}
