//! OpenTelemetry GenAI attribute names and operation values used on turn spans.
//!
//! Dotted names cannot be passed as constants to `info_span!`, so spans spell
//! the declared fields out literally; these constants are for
//! `Span::record` on fields declared as `tracing::field::Empty`.

/// Characters in the reply that was shown to the user.
pub const GEN_AI_RESPONSE_CHARS: &str = "gen_ai.response.chars";

/// Whether the reply shown was the fallback reply.
pub const SUKI_RESPONSE_FALLBACK: &str = "suki.response.fallback";

// --- Operation name values ---

/// Interactive conversation turn.
pub const OP_CHAT: &str = "chat";

/// Single prompt answered outside the interactive loop.
pub const OP_TEXT_COMPLETION: &str = "text_completion";
