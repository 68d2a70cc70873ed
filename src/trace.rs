//! Distributed-tracing context propagation.
//!
//! The Daypia API correlates calls through two request headers, `traceId`
//! and `parentSpanId`. The context is supplied by an injected provider and
//! read once per call; injection is best-effort, so an absent or invalid
//! context simply means the headers are not sent.

use std::sync::Arc;

/// Identifiers correlating one outbound call with a distributed trace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TraceContext {
    pub trace_id: String,
    pub parent_span_id: String,
}

impl TraceContext {
    pub fn new(trace_id: impl Into<String>, parent_span_id: impl Into<String>) -> Self {
        Self {
            trace_id: trace_id.into(),
            parent_span_id: parent_span_id.into(),
        }
    }

    /// Both identifiers must be non-empty and not the all-zero values
    /// OpenTelemetry uses for an invalid span context.
    pub fn is_valid(&self) -> bool {
        is_valid_id(&self.trace_id) && is_valid_id(&self.parent_span_id)
    }
}

fn is_valid_id(id: &str) -> bool {
    !id.is_empty() && id.bytes().any(|b| b != b'0')
}

/// Supplies the ambient trace context, if any.
///
/// Implement this against whatever tracing system the host application
/// runs; the client checks it once per call.
pub trait TraceContextProvider: Send + Sync {
    fn current_context(&self) -> Option<TraceContext>;
}

impl std::fmt::Debug for dyn TraceContextProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("TraceContextProvider")
    }
}

/// Provider for hosts that do not propagate traces.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopTraceContextProvider;

impl TraceContextProvider for NoopTraceContextProvider {
    fn current_context(&self) -> Option<TraceContext> {
        None
    }
}

/// Provider returning one fixed context for every call.
///
/// Useful in tests and in batch jobs that pin a single trace.
#[derive(Debug, Clone)]
pub struct StaticTraceContextProvider {
    context: TraceContext,
}

impl StaticTraceContextProvider {
    pub fn new(context: TraceContext) -> Self {
        Self { context }
    }

    pub fn shared(context: TraceContext) -> Arc<dyn TraceContextProvider> {
        Arc::new(Self::new(context))
    }
}

impl TraceContextProvider for StaticTraceContextProvider {
    fn current_context(&self) -> Option<TraceContext> {
        Some(self.context.clone())
    }
}
