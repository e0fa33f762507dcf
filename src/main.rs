#![cfg_attr(target_os = "none", no_std)]
#![cfg_attr(target_os = "none", no_main)]

mod clock;
mod stopwatch;
mod ui;

use num_traits::{FromPrimitive, ToPrimitive};
use stopwatch_core::Command;

use crate::clock::TickClock;
use crate::stopwatch::StopwatchState;

const SERVER_NAME: &str = "_Stopwatch_";
const APP_NAME: &str = "Stopwatch";

/// Display refresh cadence while running. Only affects how often we redraw;
/// elapsed time is always read fresh from the clock.
const REFRESH_INTERVAL_MS: u64 = 10;

// F-key character codes from Xous keyboard service
const KEY_F1: char = '\u{0011}';
const KEY_F2: char = '\u{0012}';
const KEY_F3: char = '\u{0013}';
const KEY_F4: char = '\u{0014}';

const HELP_TEXT: &str = "STOPWATCH HELP\n\n\
     F1     Help\n\
     F2     Start/Pause\n\
     F3     Reset\n\
     F4     Quit\n\n\
     s      Start/Resume\n\
     p      Pause\n\
     l      Record lap\n\
     r      Reset\n\
     Space  Start/Pause\n\
     Up/Dn  Scroll laps";

#[derive(Debug, num_derive::FromPrimitive, num_derive::ToPrimitive)]
enum AppOp {
    Redraw = 0,
    Rawkeys,
    FocusChange,
    Pump,
    Quit,
}

#[derive(Debug, num_derive::FromPrimitive, num_derive::ToPrimitive)]
enum PumpOp {
    Start = 0,
    Stop,
    Quit,
}

struct StopwatchApp {
    gam: gam::Gam,
    #[allow(dead_code)]
    token: [u32; 4],
    content: gam::Gid,
    screensize: gam::menu::Point,

    stopwatch: StopwatchState,

    pump_conn: xous::CID,
    pump_running: bool,
    allow_redraw: bool,
    help_visible: bool,
}

impl StopwatchApp {
    fn new(xns: &xous_names::XousNames, sid: xous::SID, pump_sid: xous::SID) -> Self {
        let gam = gam::Gam::new(xns).expect("can't connect to GAM");

        let token = gam
            .register_ux(gam::UxRegistration {
                app_name: String::from(APP_NAME),
                ux_type: gam::UxType::Chat,
                predictor: None,
                listener: sid.to_array(),
                redraw_id: AppOp::Redraw.to_u32().unwrap(),
                gotinput_id: None,
                audioframe_id: None,
                rawkeys_id: Some(AppOp::Rawkeys.to_u32().unwrap()),
                focuschange_id: Some(AppOp::FocusChange.to_u32().unwrap()),
            })
            .expect("couldn't register UX")
            .unwrap();

        let content = gam.request_content_canvas(token).expect("couldn't get canvas");
        let screensize = gam.get_canvas_bounds(content).expect("couldn't get dimensions");

        let pump_conn = xous::connect(pump_sid).expect("can't connect to pump");

        Self {
            gam,
            token,
            content,
            screensize,
            stopwatch: StopwatchState::new(),
            pump_conn,
            pump_running: false,
            allow_redraw: true,
            help_visible: false,
        }
    }

    fn redraw(&self) {
        if !self.allow_redraw {
            return;
        }
        if self.help_visible {
            ui::draw_help(&self.gam, self.content, self.screensize, HELP_TEXT);
            return;
        }
        ui::draw_stopwatch(&self.gam, self.content, self.screensize, &self.stopwatch);
    }

    fn start_pump(&mut self) {
        if !self.pump_running {
            self.pump_running = true;
            xous::send_message(
                self.pump_conn,
                xous::Message::new_scalar(
                    PumpOp::Start.to_usize().unwrap(),
                    REFRESH_INTERVAL_MS as usize,
                    0,
                    0,
                    0,
                ),
            ).ok();
        }
    }

    fn stop_pump(&mut self) {
        if self.pump_running {
            self.pump_running = false;
            xous::send_message(
                self.pump_conn,
                xous::Message::new_scalar(PumpOp::Stop.to_usize().unwrap(), 0, 0, 0, 0),
            ).ok();
        }
    }

    /// Keep the refresh pump in step with the run state.
    fn sync_pump(&mut self) {
        if self.stopwatch.model.is_running() {
            self.start_pump();
        } else {
            self.stop_pump();
        }
    }

    fn handle_pump(&mut self) {
        if self.stopwatch.model.is_running() {
            self.redraw();
        } else {
            self.stop_pump();
        }
    }

    fn run_command(&mut self, command: Command) {
        self.stopwatch.apply(command);
        self.sync_pump();
        self.redraw();
    }

    /// Returns false when the app should quit.
    fn handle_key(&mut self, key: char) -> bool {
        if key == KEY_F4 {
            if self.help_visible {
                self.help_visible = false;
                self.redraw();
                return true;
            }
            return false;
        }
        if key == KEY_F1 {
            self.help_visible = !self.help_visible;
            self.redraw();
            return true;
        }

        // If help screen is showing, any key dismisses it
        if self.help_visible {
            self.help_visible = false;
            self.redraw();
            return true;
        }

        match key {
            KEY_F2 | '\r' | '\n' => self.run_command(Command::Toggle),
            KEY_F3 => self.run_command(Command::Reset),
            '↑' => {
                if self.stopwatch.scroll_up() {
                    self.redraw();
                }
            }
            '↓' => {
                if self.stopwatch.scroll_down() {
                    self.redraw();
                }
            }
            _ => {
                if let Some(command) = Command::from_key(key) {
                    self.run_command(command);
                }
            }
        }
        true
    }
}

fn pump_thread(pump_sid: xous::SID, main_conn: xous::CID) {
    let clock = TickClock::new();
    let mut interval_ms = REFRESH_INTERVAL_MS;
    let mut running = false;

    loop {
        if running {
            clock.sleep_ms(interval_ms as usize);
            xous::send_message(
                main_conn,
                xous::Message::new_scalar(AppOp::Pump.to_usize().unwrap(), 0, 0, 0, 0),
            ).ok();
        }

        // Check for control messages (non-blocking when running, blocking when stopped)
        let envelope = if running {
            match xous::try_receive_message(pump_sid) {
                Ok(Some(env)) => Some(env),
                _ => None,
            }
        } else {
            xous::receive_message(pump_sid).ok()
        };

        if let Some(env) = envelope {
            if let xous::Message::Scalar(scalar) = &env.body {
                match FromPrimitive::from_usize(scalar.id) {
                    Some(PumpOp::Start) => {
                        interval_ms = scalar.arg1 as u64;
                        if interval_ms == 0 { interval_ms = REFRESH_INTERVAL_MS; }
                        running = true;
                    }
                    Some(PumpOp::Stop) => {
                        running = false;
                    }
                    Some(PumpOp::Quit) => break,
                    None => log::error!("unknown pump opcode: {}", scalar.id),
                }
            }
        }
    }
}

fn main() -> ! {
    log_server::init_wait().unwrap();
    log::set_max_level(log::LevelFilter::Info);
    log::info!("Stopwatch PID is {}", xous::process::id());
    log::info!("Keyboard shortcuts: s=start/resume p=pause r=reset l=lap space=start/pause");

    let xns = xous_names::XousNames::new().unwrap();
    let sid = xns.register_name(SERVER_NAME, None).expect("can't register server");
    let main_conn = xous::connect(sid).expect("can't connect to self");

    // Create pump thread
    let pump_sid = xous::create_server().expect("can't create pump server");
    std::thread::spawn(move || {
        pump_thread(pump_sid, main_conn);
    });

    let mut app = StopwatchApp::new(&xns, sid, pump_sid);

    loop {
        let msg = xous::receive_message(sid).unwrap();
        match FromPrimitive::from_usize(msg.body.id()) {
            Some(AppOp::Redraw) => {
                app.redraw();
            }
            Some(AppOp::Rawkeys) => xous::msg_scalar_unpack!(msg, k1, k2, k3, k4, {
                let keys = [
                    core::char::from_u32(k1 as u32).unwrap_or('\u{0000}'),
                    core::char::from_u32(k2 as u32).unwrap_or('\u{0000}'),
                    core::char::from_u32(k3 as u32).unwrap_or('\u{0000}'),
                    core::char::from_u32(k4 as u32).unwrap_or('\u{0000}'),
                ];
                for &key in keys.iter() {
                    if key != '\u{0000}' && !app.handle_key(key) {
                        xous::send_message(
                            main_conn,
                            xous::Message::new_scalar(AppOp::Quit.to_usize().unwrap(), 0, 0, 0, 0),
                        ).ok();
                        break;
                    }
                }
            }),
            Some(AppOp::FocusChange) => xous::msg_scalar_unpack!(msg, new_state_code, _, _, _, {
                let new_state = gam::FocusState::convert_focus_change(new_state_code);
                match new_state {
                    gam::FocusState::Background => {
                        app.allow_redraw = false;
                        app.stop_pump();
                    }
                    gam::FocusState::Foreground => {
                        app.allow_redraw = true;
                        // Restart pump if the stopwatch kept running in the background
                        app.sync_pump();
                        app.redraw();
                    }
                }
            }),
            Some(AppOp::Pump) => {
                app.handle_pump();
            }
            Some(AppOp::Quit) => break,
            _ => log::error!("unknown opcode: {:?}", msg),
        }
    }

    // Clean up
    app.stop_pump();
    xous::send_message(
        app.pump_conn,
        xous::Message::new_scalar(PumpOp::Quit.to_usize().unwrap(), 0, 0, 0, 0),
    ).ok();
    xns.unregister_server(sid).unwrap();
    xous::destroy_server(sid).unwrap();
    xous::terminate_process(0)
}
