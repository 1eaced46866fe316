//! Terminal event loop.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, mpsc};
use std::thread;
use std::time::{Duration, Instant};

use anyhow::{Result, anyhow};
use ratatui::crossterm::event::{self, Event, KeyEventKind};
use tracing::{debug, info};

use super::{Exit, PickerApp};
use crate::session::{Session, SessionReport};

const FRAME: Duration = Duration::from_millis(16);
const POLL: Duration = Duration::from_millis(50);

/// Run the picker in the terminal until the user submits or quits.
pub fn run(session: Session, languages: Vec<String>) -> Result<(Exit, SessionReport)> {
    let mut app = PickerApp::new(session, languages);
    let exit = app.run()?;
    Ok((exit, app.session().report()))
}

impl PickerApp {
    /// Pump terminal events and the page clock until an exit condition.
    pub fn run(&mut self) -> Result<Exit> {
        let mut terminal = ratatui::init();
        terminal.clear()?;

        let (event_tx, event_rx) = mpsc::channel();
        let running = Arc::new(AtomicBool::new(true));
        let running_flag = Arc::clone(&running);

        let event_thread = thread::spawn(move || -> Result<()> {
            while running_flag.load(Ordering::Relaxed) {
                if event::poll(POLL)? {
                    let event = event::read()?;
                    if event_tx.send(event).is_err() {
                        break;
                    }
                }
            }
            Ok(())
        });

        let mut last_tick = Instant::now();
        let result: Result<Exit> = 'event_loop: loop {
            loop {
                match event_rx.try_recv() {
                    Ok(Event::Key(key)) if key.kind == KeyEventKind::Press => {
                        if let Some(exit) = self.handle_key(key) {
                            break 'event_loop Ok(exit);
                        }
                    }
                    Ok(_) => {}
                    Err(mpsc::TryRecvError::Empty) => break,
                    Err(mpsc::TryRecvError::Disconnected) => {
                        break 'event_loop Err(anyhow!("input event channel disconnected"));
                    }
                }
            }

            let now = Instant::now();
            self.session.advance(now.duration_since(last_tick));
            last_tick = now;

            if let Err(err) = terminal.draw(|frame| self.draw(frame)) {
                break Err(err.into());
            }

            thread::sleep(FRAME);
        };

        ratatui::restore();

        running.store(false, Ordering::Relaxed);
        match event_thread.join() {
            Ok(join_result) => join_result?,
            Err(err) => std::panic::resume_unwind(err),
        }

        match &result {
            Ok(exit) => info!(?exit, "interactive session finished"),
            Err(err) => debug!(%err, "interactive session failed"),
        }
        result
    }
}
