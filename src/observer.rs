use crate::StreamError;

/// Receiving side of a stream.
///
/// Implementations are plain forwarding sinks. Nothing here enforces that
/// `next` stops after `complete` or `error`; that discipline belongs to the
/// producer or operator issuing the calls.
pub trait Observer {
    type NextFnType;

    fn next(&mut self, _: Self::NextFnType);
    fn complete(&mut self);
    fn error(&mut self, _: StreamError);
}
