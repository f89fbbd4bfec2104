//! Deferred notification gate: render first, prompt later.
//!
//! The gate wraps a render. Children run synchronously and unconditionally;
//! separately, in interactive contexts only, a single deferred task is
//! scheduled that awaits session identity once and surfaces the notification
//! prompt. Identity not being resolved yet is a no-op, not an error, and a
//! gate dropped before the task finishes simply discards the result.

use crate::i18n::{catalog, Locale};
use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::OnceLock;
use tracing::debug;

/// Execution context of a render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderContext {
    /// Server-side rendering; the deferred prompt never runs here.
    Server,
    /// Interactive session with a running event loop.
    Interactive,
}

/// Session identity handle produced by the external auth collaborator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionIdentity {
    /// Opaque user identifier
    pub user_id: String,

    /// The user's resolved locale
    pub locale: Locale,
}

/// The notification prompt component, loaded lazily at most once per process.
#[derive(Debug)]
pub struct NotificationPrompt;

static PROMPT: OnceLock<NotificationPrompt> = OnceLock::new();

impl NotificationPrompt {
    /// Get the prompt singleton, loading it on first use.
    pub fn get() -> &'static NotificationPrompt {
        PROMPT.get_or_init(|| {
            debug!("notification prompt loaded");
            NotificationPrompt
        })
    }

    /// The localized prompt text for a user.
    pub fn message(&self, locale: Locale) -> &'static str {
        catalog(locale)
            .get("notifications.prompt")
            .unwrap_or_default()
    }
}

/// Gate that defers notification prompting until after render.
#[derive(Debug)]
pub struct NotificationGate {
    context: RenderContext,
    activated: AtomicBool,
}

impl NotificationGate {
    /// Create a gate for the given render context.
    pub fn new(context: RenderContext) -> Self {
        Self {
            context,
            activated: AtomicBool::new(false),
        }
    }

    /// Render children synchronously, then schedule the deferred prompt.
    ///
    /// Children always run first and their output is returned untouched.
    /// Scheduling happens at most once per gate, only in interactive
    /// contexts, and requires a running tokio runtime there.
    pub fn render<T, S>(&self, session: S, children: impl FnOnce() -> T) -> T
    where
        S: Future<Output = Option<SessionIdentity>> + Send + 'static,
    {
        let output = children();
        self.schedule(session);
        output
    }

    /// Whether the deferred prompt has been scheduled on this gate.
    pub fn activated(&self) -> bool {
        self.activated.load(Ordering::SeqCst)
    }

    fn schedule<S>(&self, session: S)
    where
        S: Future<Output = Option<SessionIdentity>> + Send + 'static,
    {
        if self.context == RenderContext::Server {
            return;
        }
        if self.activated.swap(true, Ordering::SeqCst) {
            return;
        }

        // Fire and forget: nothing joins this task, so a gate dropped before
        // identity resolves simply never observes the result.
        tokio::spawn(async move {
            match session.await {
                Some(identity) => {
                    let message = NotificationPrompt::get().message(identity.locale);
                    debug!(user_id = %identity.user_id, "notification prompt ready: {message}");
                }
                None => {
                    debug!("session identity not resolved; notification prompt deferred");
                }
            }
        });
    }
}
