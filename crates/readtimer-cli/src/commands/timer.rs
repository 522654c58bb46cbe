use clap::Subcommand;
use readtimer_core::{Config, Event, PersistentStore, SessionTimer};

const TIMER_KEY: &str = "sessionTimer";

#[derive(Subcommand)]
pub enum TimerAction {
    /// Start (or resume) the countdown
    Start,
    /// Pause the countdown, preserving remaining time
    Pause,
    /// Reset to idle with the configured session length
    Reset,
    /// Print current timer state as JSON
    Status,
    /// Deliver elapsed seconds to the countdown
    Tick {
        /// Number of one-second ticks to deliver
        #[arg(long, default_value = "1")]
        seconds: u64,
    },
    /// Change the session length (idle or paused timers only)
    Set {
        /// New session length in minutes
        minutes: u32,
    },
}

fn load_timer(store: &impl PersistentStore) -> SessionTimer {
    if let Ok(Some(json)) = store.get_raw(TIMER_KEY) {
        if let Ok(timer) = serde_json::from_str::<SessionTimer>(&json) {
            return timer;
        }
    }
    SessionTimer::with_length(Config::load_or_default().session_secs())
}

fn save_timer(
    store: &impl PersistentStore,
    timer: &SessionTimer,
) -> Result<(), Box<dyn std::error::Error>> {
    let json = serde_json::to_string(timer)?;
    store.set_raw(TIMER_KEY, &json)?;
    Ok(())
}

pub fn run(action: TimerAction) -> Result<(), Box<dyn std::error::Error>> {
    let mut tracker = super::open_tracker()?;
    let mut timer = load_timer(tracker.store());

    match action {
        TimerAction::Start => {
            let event = timer.start();
            print_event_or_snapshot(event, &timer)?;
        }
        TimerAction::Pause => {
            let event = timer.pause();
            print_event_or_snapshot(event, &timer)?;
        }
        TimerAction::Reset => {
            let event = timer.reset();
            print_event_or_snapshot(event, &timer)?;
        }
        TimerAction::Status => {
            println!("{}", serde_json::to_string_pretty(&timer.snapshot())?);
        }
        TimerAction::Tick { seconds } => {
            let mut events = Vec::new();
            for _ in 0..seconds {
                if let Some(event) = timer.tick() {
                    // The countdown hit zero: fold the session into the
                    // ledger and goals before reporting.
                    if let Event::SessionCompleted { elapsed_secs, .. } = &event {
                        let recorded = tracker.record_session(*elapsed_secs)?;
                        events.push(event);
                        events.extend(recorded);
                    }
                }
            }
            if events.is_empty() {
                println!("{}", serde_json::to_string_pretty(&timer.snapshot())?);
            } else {
                println!("{}", serde_json::to_string_pretty(&events)?);
            }
        }
        TimerAction::Set { minutes } => {
            if !timer.configure(u64::from(minutes) * 60) {
                return Err("cannot change session length while the timer is running".into());
            }
            println!("{}", serde_json::to_string_pretty(&timer.snapshot())?);
        }
    }

    save_timer(tracker.store(), &timer)?;
    Ok(())
}

fn print_event_or_snapshot(
    event: Option<Event>,
    timer: &SessionTimer,
) -> Result<(), Box<dyn std::error::Error>> {
    match event {
        Some(event) => println!("{}", serde_json::to_string_pretty(&event)?),
        None => println!("{}", serde_json::to_string_pretty(&timer.snapshot())?),
    }
    Ok(())
}
