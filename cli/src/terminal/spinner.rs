use std::io::Write;
use std::sync::OnceLock;
use std::sync::mpsc::{self, RecvTimeoutError, Sender};
use std::thread;
use std::time::{Duration, Instant};

use colored::*;
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};

const TIP_DURATION: Duration = Duration::from_secs(3);
const MESSAGE_READ_TIME: Duration = Duration::from_secs(1);
const MIN_TIP_VISIBILITY: Duration = Duration::from_millis(750);
const TIPS: &[&str] = &[
    "Use --jobs to audit several hosts at once",
    "Use --verbose to see SNMP timeouts per host",
    "Use --ign-ping for hosts that drop ICMP echo",
];

pub struct SpinnerHandle {
    pub spinner: ProgressBar,
    tx: Sender<String>,
}

impl SpinnerHandle {
    pub fn send_to_queue(&self, message: String) {
        let _ = self.tx.send(message);
    }

    /// Prints above the bar, or straight to stdout while the bar is hidden.
    pub fn println(&self, msg: &str) {
        if self.spinner.is_hidden() {
            let mut stdout = std::io::stdout().lock();
            let _ = writeln!(stdout, "{msg}");
        } else {
            self.spinner.println(msg);
        }
    }

    pub fn finish_and_clear(&self) {
        self.spinner.finish_and_clear();
    }
}

pub(crate) static SPINNER: OnceLock<SpinnerHandle> = OnceLock::new();

pub fn get_spinner() -> &'static SpinnerHandle {
    SPINNER.get_or_init(init_spinner)
}

fn init_spinner() -> SpinnerHandle {
    let pb = ProgressBar::with_draw_target(Some(0), ProgressDrawTarget::hidden());
    let style = ProgressStyle::with_template(
        "{spinner:.blue} [{bar:32.green/black}] {pos}/{len} hosts {msg}",
    )
    .unwrap_or_else(|_| ProgressStyle::default_bar())
    .progress_chars("█▓░")
    .tick_strings(&[
        "▁▁▁▁▁",
        "▁▂▂▂▁",
        "▁▄▂▄▁",
        "▂▄▆▄▂",
        "▄▆█▆▄",
        "▂▄▆▄▂",
        "▁▄▂▄▁",
        "▁▂▂▂▁",
    ]);
    pb.set_style(style);

    let (tx, rx) = mpsc::channel::<String>();
    let pb_clone = pb.clone();

    thread::spawn(move || {
        let mut tip_index = 0;
        let mut next_action_time = Instant::now() + TIP_DURATION;
        let mut is_showing_tip = false;
        let mut last_tip_time = Instant::now();

        loop {
            if pb_clone.is_finished() {
                break;
            }

            let wait_time = next_action_time.saturating_duration_since(Instant::now());

            match rx.recv_timeout(wait_time) {
                Ok(mut msg) => {
                    if is_showing_tip {
                        let elapsed = last_tip_time.elapsed();
                        if elapsed < MIN_TIP_VISIBILITY {
                            thread::sleep(MIN_TIP_VISIBILITY - elapsed);
                        }
                        is_showing_tip = false;
                    }
                    while let Ok(newer_msg) = rx.try_recv() {
                        msg = newer_msg;
                    }
                    pb_clone.set_message(msg);
                    next_action_time = Instant::now() + MESSAGE_READ_TIME;
                }
                Err(RecvTimeoutError::Timeout) => {
                    if !pb_clone.is_hidden() {
                        let tip = TIPS[tip_index % TIPS.len()];
                        pb_clone.set_message(format!("{}", tip.italic().white()));
                        tip_index += 1;
                        is_showing_tip = true;
                        last_tip_time = Instant::now();
                    }
                    next_action_time = Instant::now() + TIP_DURATION;
                }
                Err(RecvTimeoutError::Disconnected) => {
                    break;
                }
            }
        }
    });

    SpinnerHandle { spinner: pb, tx }
}

/// Shows the bar for a run over `total` hosts.
pub fn start_progress(total: usize) {
    let handle = get_spinner();
    handle.spinner.set_length(total as u64);
    handle.spinner.set_position(0);
    handle.spinner.set_draw_target(ProgressDrawTarget::stderr());
    handle.spinner.enable_steady_tick(Duration::from_millis(100));
}

/// Clears the bar. Later output goes straight to stdout.
pub fn finish_progress() {
    let handle = get_spinner();
    handle.finish_and_clear();
    handle.spinner.set_draw_target(ProgressDrawTarget::hidden());
}

pub fn report_inventory_progress(done: usize) {
    let handle = get_spinner();
    handle.spinner.set_position(done as u64);
    handle.send_to_queue(format!("{} audited", done.to_string().green().bold()));
}

pub struct SpinnerWriter;

impl std::io::Write for SpinnerWriter {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        let msg = String::from_utf8_lossy(buf);
        get_spinner().println(msg.trim_end());
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}
