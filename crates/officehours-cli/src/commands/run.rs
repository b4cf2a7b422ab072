//! Live queue display.
//!
//! One event loop owns the [`App`]. It redraws, then waits on whichever comes
//! first: the one-second clock, the autosave timer, a terminal event, or a
//! finished background save. Saves run on a blocking worker with a snapshot
//! of the queue so the clock never stalls on disk I/O. The exit save waits
//! for a running save first, so an older snapshot never lands last.

use std::future;
use std::time::Duration;

use officehours_core::{Config, CueEmitter, QueueStore};
use tokio::sync::mpsc::{self, Receiver, Sender};
use tokio::time::{self, Instant, Interval, MissedTickBehavior};

use crate::tui::{
    draw, handle_event, App, InputMsg, InputPump, Request, SaveJob, TerminalBell, TerminalSession,
};

const TICK: Duration = Duration::from_secs(1);

type SaveResult = Result<usize, String>;

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;
    runtime.block_on(run_app())
}

async fn run_app() -> Result<(), Box<dyn std::error::Error>> {
    let config_path = Config::path()?;
    let config = Config::load_from(&config_path)?;
    let store = QueueStore::open_default()?;
    tracing::info!(
        config = %config_path.display(),
        store = %store.path().display(),
        "starting office hours"
    );

    let mut bell = TerminalBell::new(config.cues.enabled);
    let mut app = App::new(config, config_path, store);
    app.restore_queue()?;

    let (save_tx, mut save_rx) = mpsc::channel::<SaveResult>(4);
    let mut session = TerminalSession::new()?;
    let mut pump = InputPump::new();
    let result = event_loop(
        &mut app,
        &mut session,
        &mut pump,
        &mut bell,
        &save_tx,
        &mut save_rx,
    )
    .await;

    pump.shutdown().await;
    drop(session);

    let saved = save_on_exit(&mut app, &mut save_rx).await;
    match &saved {
        Ok(count) => tracing::info!(count, "queue saved on exit"),
        Err(e) => tracing::error!(error = %e, "final save failed"),
    }
    result?;
    saved?;
    Ok(())
}

/// Let a running save finish, then write the current queue.
async fn save_on_exit(
    app: &mut App,
    save_rx: &mut Receiver<SaveResult>,
) -> Result<usize, Box<dyn std::error::Error>> {
    if app.save_in_flight() {
        if let Some(result) = save_rx.recv().await {
            // Any follow-up is covered by the exit save.
            let _ = app.finish_save(result);
        }
    }
    let job = app.save_job();
    let count = tokio::task::spawn_blocking(move || job.run()).await??;
    Ok(count)
}

async fn event_loop(
    app: &mut App,
    session: &mut TerminalSession,
    pump: &mut InputPump,
    bell: &mut TerminalBell,
    save_tx: &Sender<SaveResult>,
    save_rx: &mut Receiver<SaveResult>,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut ticker = time::interval_at(Instant::now() + TICK, TICK);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    let mut autosave = app.save_interval().map(|period| {
        let mut interval = time::interval_at(Instant::now() + period, period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        interval
    });

    while !app.should_quit() {
        session.terminal().draw(|frame| draw(frame, app))?;

        tokio::select! {
            _ = ticker.tick() => {
                if let Some(cue) = app.on_tick() {
                    bell.emit(cue);
                }
            }
            _ = next_autosave(&mut autosave) => {
                if let Some(job) = app.begin_save() {
                    spawn_save(job, save_tx.clone());
                }
            }
            msg = pump.recv() => match msg {
                Some(InputMsg::Event(event)) => match handle_event(app, event) {
                    Some(Request::Save) => {
                        if let Some(job) = app.begin_save() {
                            spawn_save(job, save_tx.clone());
                        }
                    }
                    // The final save happens after the loop.
                    Some(Request::Quit) | None => {}
                },
                Some(InputMsg::Error(e)) => {
                    tracing::error!(error = %e, "terminal input failed");
                    return Err(e.into());
                }
                None => {
                    tracing::warn!("terminal input closed");
                    app.request_quit();
                }
            },
            Some(result) = save_rx.recv() => {
                if let Some(job) = app.finish_save(result) {
                    spawn_save(job, save_tx.clone());
                }
            }
        }
    }
    Ok(())
}

async fn next_autosave(autosave: &mut Option<Interval>) {
    match autosave {
        Some(interval) => {
            interval.tick().await;
        }
        None => future::pending::<()>().await,
    }
}

fn spawn_save(job: SaveJob, done: Sender<SaveResult>) {
    tokio::spawn(async move {
        let result = match tokio::task::spawn_blocking(move || job.run()).await {
            Ok(result) => result.map_err(|e| e.to_string()),
            Err(e) => Err(e.to_string()),
        };
        let _ = done.send(result).await;
    });
}
