use std::path::PathBuf;
use std::time::Duration;

use chrono::Utc;
use log::info;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tokio::time::sleep;

use sg_core::VideoModel;
use sg_core::error::GenerateError;
use sg_core::status::{StatusClass, classify};

use crate::events::{Command, SessionEvent};
use crate::job::{Job, SessionPhase, SessionSnapshot};

pub mod client;
pub mod store;

use client::VideoClient;
use store::ArtifactStore;

/// Polling cadence and deadline. The defaults bound a session to roughly
/// two minutes of polling; tests shrink the interval to zero.
#[derive(Debug, Clone, Copy)]
pub struct PollPolicy {
    pub interval: Duration,
    pub max_attempts: u32,
}

impl Default for PollPolicy {
    fn default() -> Self {
        Self {
            interval: Duration::from_millis(2000),
            max_attempts: 60,
        }
    }
}

/// Controller-owned session state. Nothing outside this module mutates it;
/// the UI only ever sees [`SessionSnapshot`]s.
#[derive(Debug, Clone)]
struct SessionState {
    phase: SessionPhase,
    job: Option<Job>,
    message: String,
    last_error: Option<String>,
    attempts: u32,
}

impl Default for SessionState {
    fn default() -> Self {
        Self {
            phase: SessionPhase::Idle,
            job: None,
            message: "Ready".to_string(),
            last_error: None,
            attempts: 0,
        }
    }
}

/// The job lifecycle controller: Idle → Creating → Polling → Downloading →
/// Completed | Failed. Drives the remote client, applies the polling
/// policy, and emits a snapshot after every transition.
pub struct Generator<C, S> {
    client: C,
    store: S,
    model: VideoModel,
    save_dir: PathBuf,
    policy: PollPolicy,
    state: SessionState,
    events: UnboundedSender<SessionEvent>,
}

impl<C: VideoClient, S: ArtifactStore> Generator<C, S> {
    pub fn new(
        client: C,
        store: S,
        model: VideoModel,
        save_dir: impl Into<PathBuf>,
        policy: PollPolicy,
        events: UnboundedSender<SessionEvent>,
    ) -> Self {
        Self {
            client,
            store,
            model,
            save_dir: save_dir.into(),
            policy,
            state: SessionState::default(),
            events,
        }
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            phase: self.state.phase,
            message: self.state.message.clone(),
            last_error: self.state.last_error.clone(),
        }
    }

    /// Where a finished job's artifact lands.
    pub fn destination(&self, job_id: &str) -> PathBuf {
        self.save_dir.join(format!("{job_id}.mp4"))
    }

    /// Entry point for a user intent. Empty prompts and re-entrant
    /// submissions are no-ops; anything else runs the job to a terminal
    /// phase. One create, at most one in-flight poll, and one
    /// download+persist per job.
    pub async fn submit(&mut self, prompt: &str) {
        let prompt = prompt.trim();
        if prompt.is_empty() || !self.state.phase.accepts_submission() {
            return;
        }

        self.state.last_error = None;
        self.state.job = None;
        self.state.attempts = 0;
        self.set_phase(SessionPhase::Creating, "Creating video...".to_string());

        match self.run_job(prompt).await {
            Ok(path) => {
                if let Some(job) = &self.state.job {
                    info!(
                        "job {} finished as {} in {}s",
                        job.id,
                        job.remote_status,
                        (Utc::now() - job.created_at).num_seconds()
                    );
                }
                self.set_phase(
                    SessionPhase::Completed,
                    format!("✅ Saved to: {}", path.display()),
                );
            }
            Err(err) => {
                info!("job failed: {err}");
                self.state.last_error = Some(err.to_string());
                self.set_phase(SessionPhase::Failed, "❌ Error".to_string());
            }
        }
    }

    async fn run_job(&mut self, prompt: &str) -> Result<PathBuf, GenerateError> {
        let created = self
            .client
            .create(prompt, self.model.id())
            .await
            .map_err(|e| GenerateError::Create(e.to_string()))?;
        info!("created video job {}", created.id);

        let id = created.id;
        self.state.job = Some(Job::new(id.clone()));
        self.set_phase(SessionPhase::Polling, format!("Video ID: {id}"));

        self.poll_until_terminal(&id).await?;

        // The poll loop recorded the artifact URL on the job record.
        let url = self
            .state
            .job
            .as_ref()
            .and_then(|job| job.artifact_url.clone())
            .ok_or_else(|| GenerateError::Remote("Completed without artifact URL".to_string()))?;

        self.set_phase(SessionPhase::Downloading, "Downloading...".to_string());
        let bytes = self
            .client
            .fetch_artifact(&url)
            .await
            .map_err(|e| GenerateError::Download(e.to_string()))?;

        let path = self.destination(&id);
        self.store
            .write(&path, &bytes)
            .await
            .map_err(|e| GenerateError::Download(e.to_string()))?;

        Ok(path)
    }

    /// The bounded poll loop: sleep the cadence, fetch status, classify.
    /// Unrecognized statuses count as in-progress and burn an attempt, so
    /// the cap holds even against vocabulary this client has never seen.
    async fn poll_until_terminal(&mut self, id: &str) -> Result<(), GenerateError> {
        while self.state.attempts < self.policy.max_attempts {
            sleep(self.policy.interval).await;

            let status = self
                .client
                .status(id)
                .await
                .map_err(|e| GenerateError::Remote(e.to_string()))?;

            if let Some(job) = self.state.job.as_mut() {
                job.remote_status = status.status.clone();
            }
            self.set_message(format!("Status: {}", status.status));

            match classify(&status.status) {
                StatusClass::Completed => {
                    if let Some(job) = self.state.job.as_mut() {
                        job.artifact_url = status.url;
                    }
                    return Ok(());
                }
                StatusClass::Failed => {
                    return Err(GenerateError::Remote(
                        status
                            .error
                            .unwrap_or_else(|| "Generation failed".to_string()),
                    ));
                }
                StatusClass::InProgress => {
                    self.state.attempts += 1;
                }
            }
        }

        Err(GenerateError::PollTimeout)
    }

    fn set_phase(&mut self, phase: SessionPhase, message: String) {
        self.state.phase = phase;
        self.state.message = message;
        self.emit();
    }

    fn set_message(&mut self, message: String) {
        self.state.message = message;
        self.emit();
    }

    fn emit(&self) {
        let _ = self.events.send(SessionEvent::Update(self.snapshot()));
    }
}

/// Handle the UI holds. Dropping it (or calling [`shutdown`]) ends the
/// controller task.
///
/// [`shutdown`]: GeneratorHandle::shutdown
pub struct GeneratorHandle {
    commands: UnboundedSender<Command>,
}

impl GeneratorHandle {
    pub fn submit(&self, prompt: String) {
        let _ = self.commands.send(Command::Submit(prompt));
    }

    pub fn shutdown(&self) {
        let _ = self.commands.send(Command::Shutdown);
    }
}

/// Put the controller on its own task. All lifecycle work happens on that
/// single task; the handle is the only way in.
pub fn spawn<C, S>(generator: Generator<C, S>) -> GeneratorHandle
where
    C: VideoClient + 'static,
    S: ArtifactStore + 'static,
{
    let (tx, rx) = mpsc::unbounded_channel();
    tokio::spawn(run(generator, rx));
    GeneratorHandle { commands: tx }
}

async fn run<C: VideoClient, S: ArtifactStore>(
    mut generator: Generator<C, S>,
    mut commands: UnboundedReceiver<Command>,
) {
    while let Some(command) = commands.recv().await {
        match command {
            Command::Submit(prompt) => {
                generator.submit(&prompt).await;
                // Submissions that queued up while the job ran are
                // rejected, not deferred.
                while let Ok(stale) = commands.try_recv() {
                    if matches!(stale, Command::Shutdown) {
                        return;
                    }
                }
            }
            Command::Shutdown => return,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;
    use std::sync::{Arc, Mutex};

    use super::client::{VideoCreated, VideoStatus};
    use super::*;
    use crate::error::ClientError;

    #[derive(Debug, Default, Clone)]
    struct CallLog {
        creates: usize,
        status_calls: usize,
        fetches: usize,
        last_prompt: Option<String>,
    }

    /// Replays a scripted status sequence; the last entry repeats forever.
    struct ScriptedClient {
        create: Result<String, String>,
        script: Vec<VideoStatus>,
        cursor: Mutex<usize>,
        log: Arc<Mutex<CallLog>>,
        artifact: Vec<u8>,
    }

    impl ScriptedClient {
        fn new(id: &str, script: Vec<VideoStatus>) -> Self {
            Self {
                create: Ok(id.to_string()),
                script,
                cursor: Mutex::new(0),
                log: Arc::new(Mutex::new(CallLog::default())),
                artifact: b"mp4 bytes".to_vec(),
            }
        }

        fn failing_create(message: &str) -> Self {
            Self {
                create: Err(message.to_string()),
                script: Vec::new(),
                cursor: Mutex::new(0),
                log: Arc::new(Mutex::new(CallLog::default())),
                artifact: Vec::new(),
            }
        }

        fn calls(&self) -> CallLog {
            self.log.lock().unwrap().clone()
        }
    }

    #[async_trait::async_trait]
    impl VideoClient for ScriptedClient {
        async fn create(&self, prompt: &str, _model: &str) -> Result<VideoCreated, ClientError> {
            let mut log = self.log.lock().unwrap();
            log.creates += 1;
            log.last_prompt = Some(prompt.to_string());
            drop(log);
            match &self.create {
                Ok(id) => Ok(VideoCreated { id: id.clone() }),
                Err(message) => Err(ClientError::Api(message.clone())),
            }
        }

        async fn status(&self, _id: &str) -> Result<VideoStatus, ClientError> {
            self.log.lock().unwrap().status_calls += 1;
            let mut cursor = self.cursor.lock().unwrap();
            let index = (*cursor).min(self.script.len() - 1);
            *cursor += 1;
            Ok(self.script[index].clone())
        }

        async fn fetch_artifact(&self, _url: &str) -> Result<Vec<u8>, ClientError> {
            self.log.lock().unwrap().fetches += 1;
            Ok(self.artifact.clone())
        }
    }

    #[derive(Default, Clone)]
    struct MemStore {
        writes: Arc<Mutex<Vec<(PathBuf, Vec<u8>)>>>,
    }

    #[async_trait::async_trait]
    impl ArtifactStore for MemStore {
        async fn write(&self, path: &std::path::Path, bytes: &[u8]) -> std::io::Result<()> {
            self.writes
                .lock()
                .unwrap()
                .push((path.to_path_buf(), bytes.to_vec()));
            Ok(())
        }
    }

    fn st(status: &str, url: Option<&str>, error: Option<&str>) -> VideoStatus {
        VideoStatus {
            id: None,
            status: status.to_string(),
            progress: None,
            url: url.map(str::to_string),
            error: error.map(str::to_string),
        }
    }

    fn queued() -> VideoStatus {
        st("queued", None, None)
    }

    type TestGenerator = Generator<ScriptedClient, MemStore>;

    fn test_generator(
        client: ScriptedClient,
    ) -> (
        TestGenerator,
        MemStore,
        mpsc::UnboundedReceiver<SessionEvent>,
    ) {
        let (tx, rx) = mpsc::unbounded_channel();
        let store = MemStore::default();
        let policy = PollPolicy {
            interval: Duration::ZERO,
            max_attempts: 60,
        };
        let generator = Generator::new(
            client,
            store.clone(),
            VideoModel::Sora2,
            "/tmp/videos",
            policy,
            tx,
        );
        (generator, store, rx)
    }

    fn snapshots(rx: &mut mpsc::UnboundedReceiver<SessionEvent>) -> Vec<SessionSnapshot> {
        let mut out = Vec::new();
        while let Ok(SessionEvent::Update(snapshot)) = rx.try_recv() {
            out.push(snapshot);
        }
        out
    }

    #[tokio::test]
    async fn test_empty_prompt_is_a_noop() {
        let (mut generator, _store, mut rx) = test_generator(ScriptedClient::new("vid_1", vec![]));

        generator.submit("").await;
        generator.submit("   \n\t").await;

        assert_eq!(generator.snapshot().phase, SessionPhase::Idle);
        assert_eq!(generator.client.calls().creates, 0);
        assert!(snapshots(&mut rx).is_empty());
    }

    #[tokio::test]
    async fn test_busy_phase_rejects_submission() {
        let (mut generator, _store, mut rx) = test_generator(ScriptedClient::new("vid_1", vec![]));

        for phase in [
            SessionPhase::Creating,
            SessionPhase::Polling,
            SessionPhase::Downloading,
        ] {
            generator.state.phase = phase;
            generator.submit("a cat skateboarding").await;
            assert_eq!(generator.snapshot().phase, phase);
        }

        assert_eq!(generator.client.calls().creates, 0);
        assert!(snapshots(&mut rx).is_empty());
    }

    #[tokio::test]
    async fn test_create_success_enters_polling() {
        let client = ScriptedClient::new("vid_1", vec![st("completed", Some("https://x/v.mp4"), None)]);
        let (mut generator, _store, mut rx) = test_generator(client);

        generator.submit("a cat skateboarding").await;

        let seen = snapshots(&mut rx);
        assert_eq!(seen[0].phase, SessionPhase::Creating);
        assert_eq!(seen[0].message, "Creating video...");
        assert_eq!(seen[1].phase, SessionPhase::Polling);
        assert_eq!(seen[1].message, "Video ID: vid_1");
    }

    #[tokio::test]
    async fn test_completed_job_saves_artifact_exactly_once() {
        let client = ScriptedClient::new(
            "vid_1",
            vec![
                queued(),
                queued(),
                st("completed", Some("https://x/vid_1.mp4"), None),
            ],
        );
        let (mut generator, store, mut rx) = test_generator(client);

        generator.submit("a cat skateboarding").await;

        let calls = generator.client.calls();
        assert_eq!(calls.creates, 1);
        assert_eq!(calls.status_calls, 3);
        assert_eq!(calls.fetches, 1);

        let writes = store.writes.lock().unwrap();
        assert_eq!(writes.len(), 1);
        assert_eq!(writes[0].0, PathBuf::from("/tmp/videos/vid_1.mp4"));
        assert_eq!(writes[0].1, b"mp4 bytes");

        let seen = snapshots(&mut rx);
        let messages: Vec<&str> = seen.iter().map(|s| s.message.as_str()).collect();
        assert_eq!(
            messages,
            vec![
                "Creating video...",
                "Video ID: vid_1",
                "Status: queued",
                "Status: queued",
                "Status: completed",
                "Downloading...",
                "✅ Saved to: /tmp/videos/vid_1.mp4",
            ]
        );

        let last = seen.last().unwrap();
        assert_eq!(last.phase, SessionPhase::Completed);
        assert_eq!(last.last_error, None);
    }

    #[tokio::test]
    async fn test_times_out_after_sixty_attempts() {
        let (mut generator, store, _rx) = test_generator(ScriptedClient::new("vid_1", vec![queued()]));

        generator.submit("a cat skateboarding").await;

        let calls = generator.client.calls();
        assert_eq!(calls.status_calls, 60);
        assert_eq!(calls.fetches, 0);
        assert!(store.writes.lock().unwrap().is_empty());

        let snapshot = generator.snapshot();
        assert_eq!(snapshot.phase, SessionPhase::Failed);
        assert_eq!(snapshot.message, "❌ Error");
        assert_eq!(
            snapshot.last_error.as_deref(),
            Some("Timeout waiting for video")
        );
    }

    #[tokio::test]
    async fn test_remote_failure_skips_download() {
        let client = ScriptedClient::new(
            "vid_1",
            vec![queued(), st("failed", None, Some("model exploded"))],
        );
        let (mut generator, store, _rx) = test_generator(client);

        generator.submit("a cat skateboarding").await;

        assert_eq!(generator.client.calls().fetches, 0);
        assert!(store.writes.lock().unwrap().is_empty());

        let snapshot = generator.snapshot();
        assert_eq!(snapshot.phase, SessionPhase::Failed);
        assert_eq!(snapshot.last_error.as_deref(), Some("model exploded"));
    }

    #[tokio::test]
    async fn test_remote_failure_without_text_uses_fallback() {
        let client = ScriptedClient::new("vid_1", vec![st("failed", None, None)]);
        let (mut generator, _store, _rx) = test_generator(client);

        generator.submit("a cat skateboarding").await;

        assert_eq!(
            generator.snapshot().last_error.as_deref(),
            Some("Generation failed")
        );
    }

    #[tokio::test]
    async fn test_create_failure_surfaces_api_message() {
        let (mut generator, _store, _rx) =
            test_generator(ScriptedClient::failing_create("invalid api key"));

        generator.submit("a cat skateboarding").await;

        let snapshot = generator.snapshot();
        assert_eq!(snapshot.phase, SessionPhase::Failed);
        assert_eq!(snapshot.message, "❌ Error");
        assert_eq!(snapshot.last_error.as_deref(), Some("invalid api key"));
        assert_eq!(generator.client.calls().status_calls, 0);
    }

    #[tokio::test]
    async fn test_unrecognized_status_keeps_polling() {
        let client = ScriptedClient::new(
            "vid_1",
            vec![
                st("cancelled", None, None),
                st("moderation_review", None, None),
                st("completed", Some("https://x/vid_1.mp4"), None),
            ],
        );
        let (mut generator, _store, _rx) = test_generator(client);

        generator.submit("a cat skateboarding").await;

        assert_eq!(generator.snapshot().phase, SessionPhase::Completed);
        assert_eq!(generator.client.calls().status_calls, 3);
    }

    #[tokio::test]
    async fn test_completed_without_url_fails() {
        let client = ScriptedClient::new("vid_1", vec![st("completed", None, None)]);
        let (mut generator, _store, _rx) = test_generator(client);

        generator.submit("a cat skateboarding").await;

        let snapshot = generator.snapshot();
        assert_eq!(snapshot.phase, SessionPhase::Failed);
        assert_eq!(
            snapshot.last_error.as_deref(),
            Some("Completed without artifact URL")
        );
        assert_eq!(generator.client.calls().fetches, 0);
    }

    #[tokio::test]
    async fn test_failed_session_accepts_resubmission() {
        let client = ScriptedClient::new("vid_1", vec![st("failed", None, Some("bad luck"))]);
        let (mut generator, _store, mut rx) = test_generator(client);

        generator.submit("first try").await;
        assert_eq!(generator.snapshot().phase, SessionPhase::Failed);
        let _ = snapshots(&mut rx);

        generator.submit("second try").await;

        assert_eq!(generator.client.calls().creates, 2);
        let seen = snapshots(&mut rx);
        // The first snapshot of the new run carries no stale error.
        assert_eq!(seen[0].phase, SessionPhase::Creating);
        assert_eq!(seen[0].last_error, None);
    }

    #[tokio::test]
    async fn test_job_bookkeeping_follows_polls() {
        let client = ScriptedClient::new(
            "vid_1",
            vec![queued(), st("completed", Some("https://x/vid_1.mp4"), None)],
        );
        let (mut generator, _store, _rx) = test_generator(client);

        generator.submit("  a cat skateboarding  ").await;

        // The prompt reaches the remote trimmed.
        assert_eq!(
            generator.client.calls().last_prompt.as_deref(),
            Some("a cat skateboarding")
        );

        let job = generator.state.job.as_ref().unwrap();
        assert_eq!(job.id, "vid_1");
        assert_eq!(job.remote_status, "completed");
        assert_eq!(job.artifact_url.as_deref(), Some("https://x/vid_1.mp4"));
    }

    #[tokio::test]
    async fn test_destination_path() {
        let (generator, _store, _rx) = test_generator(ScriptedClient::new("vid_1", vec![]));
        assert_eq!(
            generator.destination("vid_9"),
            PathBuf::from("/tmp/videos/vid_9.mp4")
        );
    }
}
