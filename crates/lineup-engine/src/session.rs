//! Query session engine.
//!
//! One session owns the matcher and the analyzer handle on a dedicated
//! thread (explicit state, not process-wide globals) and serves queries
//! through a channel. Each query carries a generation tag; submitting a
//! new query supersedes every older in-flight one, and a superseded
//! query yields no draw commands.

use lineup_core::{
    plan_overlay, Descriptor, DrawCommand, Detection, FaceAnalyzer, FaceMatcher, MatchResult,
};
use lineup_media::Pixels;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::{mpsc, oneshot};

#[derive(Error, Debug)]
pub enum SessionError {
    /// Detection failed for this image only; the session and its gallery
    /// remain valid for the next query.
    #[error("face detection failed for this image: {0}")]
    Detect(#[from] lineup_core::AnalyzerError),
    #[error("session thread exited")]
    ChannelClosed,
}

/// One detected face paired with its gallery match.
#[derive(Debug, Clone)]
pub struct FaceMatch {
    pub detection: Detection,
    pub result: MatchResult,
}

/// Result of a query, aligned with the detections of the submitted image.
#[derive(Debug, Clone)]
pub enum QueryOutcome {
    /// Finished while still the newest query. `faces[i]` corresponds to
    /// the i-th detection; `commands` is the planned overlay.
    Completed {
        faces: Vec<FaceMatch>,
        commands: Vec<DrawCommand>,
    },
    /// A newer query replaced this one before it finished. Nothing may
    /// be drawn from it.
    Superseded,
}

enum SessionRequest {
    Query {
        pixels: Pixels,
        generation: u64,
        reply: oneshot::Sender<Result<QueryOutcome, SessionError>>,
    },
}

/// Clone-safe handle to the session thread.
#[derive(Clone)]
pub struct SessionHandle {
    tx: mpsc::Sender<SessionRequest>,
    generation: Arc<AtomicU64>,
}

impl SessionHandle {
    /// Submit a query image: detect all faces, match each descriptor,
    /// plan the overlay.
    ///
    /// Submitting a query immediately supersedes all older in-flight
    /// queries; they resolve to [`QueryOutcome::Superseded`].
    pub async fn query(&self, pixels: Pixels) -> Result<QueryOutcome, SessionError> {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        let (reply_tx, reply_rx) = oneshot::channel();
        self.tx
            .send(SessionRequest::Query {
                pixels,
                generation,
                reply: reply_tx,
            })
            .await
            .map_err(|_| SessionError::ChannelClosed)?;
        reply_rx.await.map_err(|_| SessionError::ChannelClosed)?
    }
}

/// Spawn the session on a dedicated OS thread.
///
/// The analyzer runs synchronously on that thread; queries queue up
/// behind it and are answered in submission order.
pub fn spawn_session(
    analyzer: Arc<dyn FaceAnalyzer + Send + Sync>,
    matcher: FaceMatcher,
) -> SessionHandle {
    let (tx, mut rx) = mpsc::channel::<SessionRequest>(4);
    let generation = Arc::new(AtomicU64::new(0));
    let current = generation.clone();

    std::thread::Builder::new()
        .name("lineup-session".into())
        .spawn(move || {
            tracing::info!(
                identities = matcher.gallery().identity_count(),
                threshold = matcher.threshold(),
                "session thread started"
            );
            while let Some(req) = rx.blocking_recv() {
                match req {
                    SessionRequest::Query {
                        pixels,
                        generation,
                        reply,
                    } => {
                        let result = run_query(&*analyzer, &matcher, &pixels, generation, &current);
                        let _ = reply.send(result);
                    }
                }
            }
            tracing::info!("session thread exiting");
        })
        .expect("failed to spawn session thread");

    SessionHandle { tx, generation }
}

fn run_query(
    analyzer: &dyn FaceAnalyzer,
    matcher: &FaceMatcher,
    pixels: &Pixels,
    generation: u64,
    current: &AtomicU64,
) -> Result<QueryOutcome, SessionError> {
    // Already superseded while queued: skip the model call outright.
    if current.load(Ordering::SeqCst) != generation {
        tracing::debug!(generation, "query superseded before detection");
        return Ok(QueryOutcome::Superseded);
    }

    let detections = analyzer.detect_all_faces(&pixels.data, pixels.width, pixels.height)?;
    let descriptors: Vec<Descriptor> = detections.iter().map(|d| d.descriptor.clone()).collect();
    let results = matcher.match_all(&descriptors);

    // A newer query may have arrived during detection; its results own
    // the surface now.
    if current.load(Ordering::SeqCst) != generation {
        tracing::debug!(generation, "query superseded, discarding results");
        return Ok(QueryOutcome::Superseded);
    }

    if detections.is_empty() {
        tracing::info!(generation, "no faces detected");
    } else {
        tracing::info!(generation, count = detections.len(), "faces matched");
    }

    let commands = plan_overlay(&detections, &results);
    let faces = detections
        .into_iter()
        .zip(results)
        .map(|(detection, result)| FaceMatch { detection, result })
        .collect();

    Ok(QueryOutcome::Completed { faces, commands })
}
