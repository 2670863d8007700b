use {
    crate::*,
    base::Clock,
    image::Image,
    motion::{MotionParameters, MotionSettings},
    std::{
        panic::{AssertUnwindSafe, catch_unwind},
        sync::{
            Arc,
            atomic::{AtomicBool, Ordering},
        },
    },
    tokio::{
        sync::{Mutex, watch},
        task::{JoinHandle, spawn_blocking},
    },
    video::FrameSource,
};

/// Builds a fresh, unopened frame source for every capture run.
pub type SourceFactory = Arc<dyn Fn() -> Box<dyn FrameSource> + Send + Sync>;

/// Latest display frame together with the status it was produced under.
#[derive(Clone, Debug)]
pub struct Snapshot {
    pub frame: Arc<Image>,
    pub status: MotionStatus,
}

struct Worker {
    cancel: Arc<AtomicBool>,
    join_handle: JoinHandle<()>,
}

/// Control handle for the capture loop. Start and stop are idempotent; the
/// queries never block on the loop.
pub struct CaptureService {
    config: CaptureConfig,
    factory: SourceFactory,
    notifier: Arc<dyn Notifier>,
    clock: Arc<dyn Clock>,
    settings: watch::Sender<MotionSettings>,
    snapshot: Arc<watch::Sender<Snapshot>>,
    worker: Mutex<Option<Worker>>,
}

impl CaptureService {
    pub fn new(
        config: CaptureConfig,
        factory: SourceFactory,
        notifier: Arc<dyn Notifier>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let (settings, _) = watch::channel(config.motion());
        let (snapshot, _) = watch::channel(Self::stopped_snapshot(&config, &clock, config.motion()));
        Self {
            config,
            factory,
            notifier,
            clock,
            settings,
            snapshot: Arc::new(snapshot),
            worker: Mutex::new(None),
        }
    }

    fn stopped_snapshot(
        config: &CaptureConfig,
        clock: &Arc<dyn Clock>,
        settings: MotionSettings,
    ) -> Snapshot {
        Snapshot {
            frame: Arc::new(placeholder_frame(
                Placeholder::NoCamera,
                config.placeholder_size(),
                &clock.local_time(),
            )),
            status: MotionStatus {
                settings,
                ..Default::default()
            },
        }
    }

    pub async fn start_capture(&self) -> ControlStatus {
        let mut worker = self.worker.lock().await;
        if let Some(running) = worker.as_ref() {
            if !running.join_handle.is_finished() {
                return ControlStatus::AlreadyActive;
            }
        }

        let cancel = Arc::new(AtomicBool::new(false));
        let join_handle = spawn_blocking({
            let config = self.config.clone();
            let factory = Arc::clone(&self.factory);
            let notifier = Arc::clone(&self.notifier);
            let clock = Arc::clone(&self.clock);
            let settings = self.settings.subscribe();
            let snapshot = Arc::clone(&self.snapshot);
            let cancel = Arc::clone(&cancel);
            move || run_loop(config, factory, notifier, clock, settings, snapshot, cancel)
        });
        *worker = Some(Worker {
            cancel,
            join_handle,
        });
        ControlStatus::Started
    }

    /// Waits for the loop to finish its current iteration and shut down.
    pub async fn stop_capture(&self) -> ControlStatus {
        let mut worker = self.worker.lock().await;
        let Some(running) = worker.take() else {
            return ControlStatus::AlreadyStopped;
        };
        running.cancel.store(true, Ordering::Relaxed);
        if let Err(error) = running.join_handle.await {
            log::error!("capture worker failed: {}", error);
        }
        self.snapshot.send_replace(Self::stopped_snapshot(
            &self.config,
            &self.clock,
            *self.settings.borrow(),
        ));
        ControlStatus::Stopped
    }

    pub async fn is_active(&self) -> bool {
        self.worker
            .lock()
            .await
            .as_ref()
            .is_some_and(|running| !running.join_handle.is_finished())
    }

    /// Latest annotated frame, or a placeholder while stopped.
    pub fn get_frame(&self) -> Arc<Image> {
        Arc::clone(&self.snapshot.borrow().frame)
    }

    pub fn motion_status(&self) -> MotionStatus {
        self.snapshot.borrow().status.clone()
    }

    /// Watch every published snapshot.
    pub fn subscribe(&self) -> watch::Receiver<Snapshot> {
        self.snapshot.subscribe()
    }

    /// Update the given parameters, clamped, and return what is now in
    /// effect. A running loop picks them up before its next frame.
    pub fn set_motion_parameters(&self, params: MotionParameters) -> MotionSettings {
        let mut settings = MotionSettings::default();
        self.settings.send_modify(|current| {
            *current = current.apply(&params);
            settings = *current;
        });
        log::info!(
            "motion parameters: threshold {}, min area {}, cooldown {:.1}s",
            settings.threshold(),
            settings.min_area(),
            settings.cooldown_seconds()
        );
        settings
    }

    pub fn motion_parameters(&self) -> MotionSettings {
        *self.settings.borrow()
    }
}

fn run_loop(
    config: CaptureConfig,
    factory: SourceFactory,
    notifier: Arc<dyn Notifier>,
    clock: Arc<dyn Clock>,
    mut settings: watch::Receiver<MotionSettings>,
    snapshot: Arc<watch::Sender<Snapshot>>,
    cancel: Arc<AtomicBool>,
) {
    let idle_interval = config.idle_interval();
    let mut runtime = CameraRuntime::new(config, factory(), notifier, Arc::clone(&clock));
    runtime.apply_settings(*settings.borrow_and_update());

    while !cancel.load(Ordering::Relaxed) {
        if settings.has_changed().unwrap_or(false) {
            runtime.apply_settings(*settings.borrow_and_update());
        }

        let frame = match catch_unwind(AssertUnwindSafe(|| runtime.process_frame())) {
            Ok(frame) => frame,
            Err(_) => {
                log::error!("capture iteration panicked, continuing with placeholder");
                runtime.recover();
                runtime.placeholder(Placeholder::CameraError)
            }
        };

        snapshot.send_replace(Snapshot {
            frame: Arc::new(frame),
            status: runtime.motion_status(),
        });

        if !runtime.is_live() {
            clock.sleep(idle_interval);
        }
    }

    runtime.shutdown();
}
