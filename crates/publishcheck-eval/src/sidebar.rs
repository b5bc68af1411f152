//! Sidebar controller wiring the evaluator to host events.
//!
//! Every trigger (mount, a field change, the Validate button) runs one full
//! synchronous pass and overwrites the current status. There is no debouncing.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use publishcheck_core::{ChangeListener, SchemaProvider, ValueProvider, check_content_type};
use publishcheck_rules::CompileOptions;

use crate::engine::EvaluationEngine;
use crate::errors::Result;
use crate::model::Verdict;
use crate::presentation::Status;

/// Validate button plus status note for the entry being edited.
pub struct Sidebar<H> {
    inner: Rc<SidebarState<H>>,
}

struct SidebarState<H> {
    host: H,
    engine: EvaluationEngine,
    status: Cell<Status>,
    last_verdict: RefCell<Option<Verdict>>,
    passes: Cell<u64>,
    mounted: Cell<bool>,
}

impl<H> Sidebar<H>
where
    H: SchemaProvider + ValueProvider + 'static,
{
    /// Create a sidebar for `host`; the status starts out valid.
    pub fn new(host: H, options: CompileOptions) -> Result<Self> {
        check_content_type(host.content_type())?;
        Ok(Self {
            inner: Rc::new(SidebarState {
                host,
                engine: EvaluationEngine::new(options),
                status: Cell::new(Status::default()),
                last_verdict: RefCell::new(None),
                passes: Cell::new(0),
                mounted: Cell::new(false),
            }),
        })
    }

    /// Run the initial pass and subscribe to changes on every field.
    ///
    /// Mounting twice does not register listeners again.
    pub fn mount(&self) -> Status {
        if self.inner.mounted.replace(true) {
            return self.inner.status.get();
        }

        let status = self.inner.run_pass("mount");

        let state = Rc::downgrade(&self.inner);
        let listener: ChangeListener = Rc::new(move |field_id: &str| {
            if let Some(state) = state.upgrade() {
                tracing::debug!(event = "field_changed", field = %field_id);
                state.run_pass("value_changed");
            }
        });

        let field_ids = self.inner.host.field_ids();
        for field_id in &field_ids {
            self.inner
                .host
                .on_value_changed(field_id, Rc::clone(&listener));
        }
        tracing::info!(event = "sidebar_mounted", fields = field_ids.len());

        status
    }

    /// Handler for the Validate button.
    pub fn validate(&self) -> Status {
        self.inner.run_pass("button")
    }

    pub fn status(&self) -> Status {
        self.inner.status.get()
    }

    /// Verdict of the last successful pass.
    pub fn last_verdict(&self) -> Option<Verdict> {
        self.inner.last_verdict.borrow().clone()
    }

    /// Number of passes run so far, failed ones included.
    pub fn passes(&self) -> u64 {
        self.inner.passes.get()
    }

    pub fn host(&self) -> &H {
        &self.inner.host
    }
}

impl<H> SidebarState<H>
where
    H: SchemaProvider + ValueProvider,
{
    fn run_pass(&self, trigger: &'static str) -> Status {
        let pass = self.passes.get() + 1;
        self.passes.set(pass);

        let status = match self.engine.run(&self.host) {
            Ok(verdict) => {
                let status = Status::from(&verdict);
                *self.last_verdict.borrow_mut() = Some(verdict);
                status
            }
            Err(err) => {
                tracing::error!(event = "pass_failed", pass, trigger, error = %err);
                *self.last_verdict.borrow_mut() = None;
                Status::Invalid
            }
        };

        tracing::debug!(event = "status_updated", pass, trigger, status = status.note_kind());
        self.status.set(status);
        status
    }
}
