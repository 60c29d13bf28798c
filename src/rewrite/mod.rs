//! Rewriting collaborator: prompt construction, chat client, and the
//! structured rewritten-resume record.

pub mod client;
pub mod prompts;
pub mod schema;

pub use client::{ChatRewriter, RewriteRequest, TextRewriter};
pub use schema::RewrittenResume;
