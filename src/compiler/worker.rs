//! Background compile worker.
//!
//! One thread owns the [`Compiler`] and runs every job to completion; the UI
//! thread talks to it over a pair of mpsc channels. Jobs carry a monotonically
//! increasing sequence number and the pipeline applies a result only when its
//! sequence exceeds the last applied one, so whichever compile was *initiated*
//! last wins no matter the completion order.

use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::Arc;
use std::thread;

use log::{debug, warn};

use super::{CompileError, Compiler};
use crate::states::document::{CompileStatus, DocumentState};

struct CompileJob {
    seq: u64,
    source: String,
}

struct CompileResult {
    seq: u64,
    outcome: Result<String, CompileError>,
}

pub struct CompilePipeline {
    job_tx: Sender<CompileJob>,
    result_rx: Receiver<CompileResult>,
    next_seq: u64,
    last_applied_seq: u64,
    in_flight: usize,
    settled_status: CompileStatus,
}

impl CompilePipeline {
    /// Spawn the worker thread around a compiler implementation.
    pub fn spawn(compiler: Arc<dyn Compiler>) -> Self {
        let (job_tx, job_rx) = mpsc::channel::<CompileJob>();
        let (result_tx, result_rx) = mpsc::channel::<CompileResult>();

        thread::spawn(move || {
            while let Ok(job) = job_rx.recv() {
                debug!("compile #{} ({} bytes)", job.seq, job.source.len());
                let outcome = compiler.compile(&job.source);
                if result_tx
                    .send(CompileResult {
                        seq: job.seq,
                        outcome,
                    })
                    .is_err()
                {
                    // Receiver gone: the app is shutting down.
                    break;
                }
            }
            debug!("compile worker stopped");
        });

        Self::from_channels(job_tx, result_rx)
    }

    fn from_channels(job_tx: Sender<CompileJob>, result_rx: Receiver<CompileResult>) -> Self {
        Self {
            job_tx,
            result_rx,
            next_seq: 1,
            last_applied_seq: 0,
            in_flight: 0,
            settled_status: CompileStatus::Idle,
        }
    }

    /// Queue a compile of the document's current source and mark the document
    /// compiling. Earlier in-flight jobs keep running; their results will be
    /// discarded as stale once this one applies.
    pub fn request(&mut self, doc: &mut DocumentState) {
        let seq = self.next_seq;
        self.next_seq += 1;
        doc.begin_compile();
        self.in_flight += 1;
        if self
            .job_tx
            .send(CompileJob {
                seq,
                source: doc.source.clone(),
            })
            .is_err()
        {
            warn!("compile worker unavailable; dropping request #{seq}");
            self.in_flight -= 1;
            doc.complete_compile(Err(CompileError::new("compile worker is not running")));
        }
    }

    /// Drain finished compiles into the document. Returns true when anything
    /// was applied (the caller repaints).
    pub fn poll(&mut self, doc: &mut DocumentState) -> bool {
        let mut applied = false;
        while let Ok(result) = self.result_rx.try_recv() {
            self.in_flight = self.in_flight.saturating_sub(1);
            if result.seq <= self.last_applied_seq {
                debug!("discarding stale compile #{}", result.seq);
                continue;
            }
            self.last_applied_seq = result.seq;
            doc.complete_compile(result.outcome);
            self.settled_status = doc.status;
            applied = true;
        }
        if applied && self.in_flight > 0 {
            // A fresher request is still outstanding; keep signalling activity.
            doc.begin_compile();
        } else if !applied && self.in_flight == 0 && doc.status == CompileStatus::Compiling {
            // The last outstanding results were all stale; the document is
            // whatever the most recent applied compile left it as.
            doc.status = self.settled_status;
        }
        applied
    }

    pub fn is_busy(&self) -> bool {
        self.in_flight > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::states::document::CompileStatus;
    use std::time::{Duration, Instant};

    struct FakeCompiler {
        fail: bool,
    }

    impl Compiler for FakeCompiler {
        fn compile(&self, source: &str) -> Result<String, CompileError> {
            if self.fail {
                Err(CompileError::new("fake failure"))
            } else {
                Ok(format!("/* compiled */ {source}"))
            }
        }
    }

    /// Pipeline wired to hand-held channels so tests control completion order.
    fn manual_pipeline() -> (CompilePipeline, Receiver<CompileJob>, Sender<CompileResult>) {
        let (job_tx, job_rx) = mpsc::channel();
        let (result_tx, result_rx) = mpsc::channel();
        (
            CompilePipeline::from_channels(job_tx, result_rx),
            job_rx,
            result_tx,
        )
    }

    fn poll_until_applied(pipeline: &mut CompilePipeline, doc: &mut DocumentState) {
        let deadline = Instant::now() + Duration::from_secs(5);
        while !pipeline.poll(doc) {
            assert!(Instant::now() < deadline, "worker never answered");
            thread::sleep(Duration::from_millis(5));
        }
    }

    #[test]
    fn spawned_worker_compiles_current_source() {
        let mut pipeline = CompilePipeline::spawn(Arc::new(FakeCompiler { fail: false }));
        let mut doc = DocumentState::default();
        doc.set_source("@x: 1;");
        pipeline.request(&mut doc);
        assert_eq!(doc.status, CompileStatus::Compiling);

        poll_until_applied(&mut pipeline, &mut doc);
        assert_eq!(doc.status, CompileStatus::Ready);
        assert_eq!(doc.css, "/* compiled */ @x: 1;");
        assert!(!pipeline.is_busy());
    }

    #[test]
    fn spawned_worker_reports_failure_as_diagnostic() {
        let mut pipeline = CompilePipeline::spawn(Arc::new(FakeCompiler { fail: true }));
        let mut doc = DocumentState::default();
        pipeline.request(&mut doc);
        poll_until_applied(&mut pipeline, &mut doc);
        assert_eq!(doc.status, CompileStatus::Failed);
        assert_eq!(doc.diagnostic.as_deref(), Some("fake failure"));
    }

    #[test]
    fn later_request_wins_even_when_it_completes_first() {
        let (mut pipeline, job_rx, result_tx) = manual_pipeline();
        let mut doc = DocumentState::default();

        doc.set_source("A");
        pipeline.request(&mut doc); // seq 1
        doc.set_source("B");
        pipeline.request(&mut doc); // seq 2

        let job_a = job_rx.recv().unwrap();
        let job_b = job_rx.recv().unwrap();
        assert_eq!((job_a.seq, job_b.seq), (1, 2));

        // B finishes first, then A straggles in.
        result_tx
            .send(CompileResult {
                seq: job_b.seq,
                outcome: Ok(".b {}".into()),
            })
            .unwrap();
        assert!(pipeline.poll(&mut doc));
        assert_eq!(doc.css, ".b {}");

        result_tx
            .send(CompileResult {
                seq: job_a.seq,
                outcome: Ok(".a {}".into()),
            })
            .unwrap();
        assert!(!pipeline.poll(&mut doc), "stale result must be discarded");
        assert_eq!(doc.css, ".b {}");
        assert_eq!(doc.status, CompileStatus::Ready);
    }

    #[test]
    fn stays_compiling_while_a_fresher_request_is_outstanding() {
        let (mut pipeline, job_rx, result_tx) = manual_pipeline();
        let mut doc = DocumentState::default();

        pipeline.request(&mut doc); // seq 1
        pipeline.request(&mut doc); // seq 2
        let job_a = job_rx.recv().unwrap();
        let _job_b = job_rx.recv().unwrap();

        // The older result arrives first: apply it (it is the most recently
        // initiated one *whose result has arrived*) but keep Compiling.
        result_tx
            .send(CompileResult {
                seq: job_a.seq,
                outcome: Ok(".a {}".into()),
            })
            .unwrap();
        assert!(pipeline.poll(&mut doc));
        assert_eq!(doc.css, ".a {}");
        assert_eq!(doc.status, CompileStatus::Compiling);
        assert!(pipeline.is_busy());
    }

    #[test]
    fn dead_worker_fails_the_request_inline() {
        let (mut pipeline, job_rx, _result_tx) = manual_pipeline();
        drop(job_rx);
        let mut doc = DocumentState::default();
        pipeline.request(&mut doc);
        assert_eq!(doc.status, CompileStatus::Failed);
        assert!(doc
            .diagnostic
            .as_deref()
            .unwrap()
            .contains("not running"));
        assert!(!pipeline.is_busy());
    }
}
