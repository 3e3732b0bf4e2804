// Carousel Scroller - headless demo host
// Drives a five page carousel from a calloop timer and logs every event

use anyhow::{Context, Result};
use std::collections::VecDeque;
use std::time::{Duration, Instant};

use carousel_scroller::{
    config::ScrollerConfig,
    update::TickScheduler,
    PointerEvent, Scroller, Viewport,
};

/// One scripted host action, due at `at_ms` on the demo clock
#[derive(Debug, Clone, Copy)]
enum Step {
    Down(f64),
    Move(f64),
    Up(f64),
    ScrollTo(usize),
    FastScroll(usize),
}

/// Main application state
struct DemoHost {
    scroller: Scroller<u32>,
    scheduler: TickScheduler,
    script: VecDeque<(u64, Step)>,
    started: Instant,
    signal: calloop::LoopSignal,
}

impl DemoHost {
    fn now_ms(&self) -> u64 {
        self.started.elapsed().as_millis() as u64
    }

    /// Run every scripted step that has come due
    fn run_script(&mut self) {
        let now = self.now_ms();
        while let Some(&(at_ms, step)) = self.script.front() {
            if at_ms > now {
                break;
            }
            self.script.pop_front();
            tracing::info!(at_ms, ?step, "Replaying scripted input");

            let pointer = |x| PointerEvent::new(x, 150.0, now);
            match step {
                Step::Down(x) => self.scroller.pointer_down(pointer(x)),
                Step::Move(x) => self.scroller.pointer_move(pointer(x)),
                Step::Up(x) => self.scroller.pointer_up(pointer(x)),
                Step::ScrollTo(index) => {
                    let duration =
                        Duration::from_millis(self.scroller.config().default_duration_ms);
                    if let Err(e) = self.scroller.scroll_to(index, duration, 0) {
                        tracing::warn!(error = %e, index, "scroll_to refused");
                    }
                }
                Step::FastScroll(index) => {
                    if let Err(e) = self.scroller.fast_scroll(index) {
                        tracing::warn!(error = %e, index, "fast_scroll refused");
                    }
                }
            }
        }
    }

    /// Advance the scroller by every tick that came due
    fn on_timer(&mut self) -> Duration {
        self.run_script();

        let interval = self.scheduler.interval();
        for _ in 0..self.scheduler.poll(Instant::now()) {
            self.scroller.tick(interval);
        }
        if self.scroller.tick_metrics().is_over_budget() {
            tracing::warn!(
                last_us = self.scroller.tick_metrics().last_tick_time().as_micros() as u64,
                "Tick ran over budget"
            );
        }

        if self.script.is_empty() && !self.scroller.needs_tick() {
            tracing::info!(
                current = ?self.scroller.current_index(),
                "Script finished and scroller settled"
            );
            self.signal.stop();
        }
        self.scheduler.time_until_next_tick(Instant::now())
    }
}

fn demo_script() -> VecDeque<(u64, Step)> {
    VecDeque::from(vec![
        // Swipe left fast enough to flick to the next page
        (100, Step::Down(600.0)),
        (116, Step::Move(560.0)),
        (132, Step::Move(480.0)),
        (148, Step::Move(400.0)),
        (164, Step::Move(380.0)),
        (180, Step::Up(380.0)),
        // Take the short way round to the last page, then hurry home
        (900, Step::ScrollTo(4)),
        (1600, Step::FastScroll(0)),
    ])
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    tracing::info!("Starting carousel scroller demo");

    let config = match std::env::args().nth(1) {
        Some(path) => ScrollerConfig::load_from(path.as_ref())
            .with_context(|| format!("Failed to load config from {}", path))?,
        None => ScrollerConfig::load().context("Failed to load config")?,
    };
    tracing::info!("Configuration loaded: {:?}", config);

    let tick_interval = config.tick_interval();
    let mut scroller = Scroller::new(config, Viewport::new(0.0, 0.0, 800.0, 300.0));
    scroller.subscribe(|event| match serde_json::to_string(event) {
        Ok(line) => println!("{}", line),
        Err(e) => tracing::error!(error = %e, "Failed to serialize event"),
    });
    for page in 0..5 {
        scroller
            .append_with_size(page, 800.0, 300.0)
            .with_context(|| format!("Failed to append page {}", page))?;
    }

    let mut event_loop = calloop::EventLoop::<DemoHost>::try_new()
        .context("Failed to create event loop")?;

    let mut host = DemoHost {
        scroller,
        scheduler: TickScheduler::new(tick_interval),
        script: demo_script(),
        started: Instant::now(),
        signal: event_loop.get_signal(),
    };

    let timer = calloop::timer::Timer::from_duration(tick_interval);
    event_loop
        .handle()
        .insert_source(timer, |_deadline, _metadata, host| {
            let next = host.on_timer();
            calloop::timer::TimeoutAction::ToDuration(next.max(Duration::from_millis(1)))
        })
        .map_err(|e| anyhow::anyhow!("Failed to insert timer source: {:?}", e))?;

    // Signal handling for graceful shutdown
    let signals = calloop::signals::Signals::new(&[calloop::signals::Signal::SIGINT])
        .context("Failed to create signal handler for graceful shutdown")?;
    event_loop
        .handle()
        .insert_source(signals, |_signal, _metadata, host| {
            tracing::info!("Received SIGINT, exiting gracefully");
            host.signal.stop();
        })
        .map_err(|e| anyhow::anyhow!("Failed to insert signal handler: {:?}", e))?;

    tracing::info!("Event loop starting");
    event_loop
        .run(Duration::from_millis(16), &mut host, |_| {})
        .context("Event loop dispatch error")?;

    for handle in host.scroller.destroy() {
        tracing::debug!(handle, "Page released");
    }
    Ok(())
}
