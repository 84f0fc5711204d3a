//! Host fakes for the board collaborators
//!
//! Every fake that takes time shares one [`FakeClock`], so blocking holds,
//! tones and the loop delay all move the same simulated clock.

use std::cell::Cell;
use std::collections::VecDeque;
use std::rc::Rc;

use embedded_hal::delay::DelayNs;
use paperdoro_core::config::ApplianceConfig;
use paperdoro_display::{FrameBuffer, GraphicsSurface};
use paperdoro_hal::{
    DrawSurface, ImageStore, Monotonic, Point, PowerSource, Rect, Speaker, StorageError,
    TouchSource, Tone,
};

use crate::appliance::{Appliance, Board};

pub const WIDTH: u32 = 540;
pub const HEIGHT: u32 = 960;

pub const PLAY: Point = Point::new(100, 800);
pub const PAUSE: Point = Point::new(250, 800);
pub const STOP: Point = Point::new(400, 800);
pub const FIVE_MIN: Point = Point::new(250, 900);
pub const REFRESH: Point = Point::new(510, 30);

/// Simulated monotonic clock with nanosecond resolution
#[derive(Debug, Clone, Default)]
pub struct FakeClock {
    now_ns: Rc<Cell<u64>>,
}

impl FakeClock {
    pub fn advance_ms(&self, ms: u64) {
        self.now_ns.set(self.now_ns.get() + ms * 1_000_000);
    }
}

impl Monotonic for FakeClock {
    fn now_ms(&self) -> u64 {
        self.now_ns.get() / 1_000_000
    }
}

impl DelayNs for FakeClock {
    fn delay_ns(&mut self, ns: u32) {
        self.now_ns.set(self.now_ns.get() + ns as u64);
    }
}

/// Touch controller replaying a script of timed press edges
pub struct ScriptedTouch {
    clock: FakeClock,
    script: VecDeque<(u64, Point)>,
}

impl TouchSource for ScriptedTouch {
    fn poll_press_edge(&mut self) -> Option<Point> {
        match self.script.front() {
            Some(&(at_ms, point)) if at_ms <= self.clock.now_ms() => {
                self.script.pop_front();
                Some(point)
            }
            _ => None,
        }
    }
}

/// Speaker that records tones and blocks for their duration
pub struct FakeSpeaker {
    clock: FakeClock,
    pub tones: Vec<(u16, u32)>,
}

impl FakeSpeaker {
    pub fn count(&self, tone: (u16, u32)) -> usize {
        self.tones.iter().filter(|&&t| t == tone).count()
    }
}

impl Speaker for FakeSpeaker {
    fn tone(&mut self, frequency_hz: u16, duration_ms: u32) {
        self.tones.push((frequency_hz, duration_ms));
        self.clock.advance_ms(duration_ms as u64);
    }
}

/// Battery gauge and suspend switch
pub struct FakePower {
    clock: FakeClock,
    pub level: u8,
    pub charging: bool,
    /// Time of every suspend call
    pub suspended_at: Vec<u64>,
}

impl PowerSource for FakePower {
    fn battery_percent(&mut self) -> u8 {
        self.level
    }

    fn is_charging(&mut self) -> bool {
        self.charging
    }

    fn suspend(&mut self) {
        self.suspended_at.push(self.clock.now_ms());
    }
}

/// Image store holding at most the lock image, drawn as a black square
pub struct FakeStore {
    pub has_image: bool,
}

impl ImageStore for FakeStore {
    fn exists(&mut self, _path: &str) -> bool {
        self.has_image
    }

    fn draw_image_file<S: DrawSurface>(
        &mut self,
        _path: &str,
        origin: Point,
        surface: &mut S,
    ) -> Result<(), StorageError> {
        if !self.has_image {
            return Err(StorageError::NotFound);
        }
        surface
            .fill_region(Rect::new(origin.x, origin.y, 540, 540), Tone::Black)
            .map_err(|_| StorageError::Surface)
    }
}

pub type TestSurface = GraphicsSurface<FrameBuffer>;
pub type TestBoard = Board<TestSurface, ScriptedTouch, FakePower, FakeSpeaker, FakeStore, FakeClock>;
pub type TestAppliance = Appliance<TestSurface, ScriptedTouch, FakePower, FakeSpeaker, FakeStore, FakeClock>;

/// Board with a 540x960 framebuffer and the given touch script
pub fn board(script: &[(u64, Point)]) -> TestBoard {
    let clock = FakeClock::default();
    Board {
        surface: GraphicsSurface::new(FrameBuffer::new(WIDTH, HEIGHT)),
        touch: ScriptedTouch {
            clock: clock.clone(),
            script: script.iter().copied().collect(),
        },
        power: FakePower {
            clock: clock.clone(),
            level: 80,
            charging: false,
            suspended_at: Vec::new(),
        },
        speaker: FakeSpeaker {
            clock: clock.clone(),
            tones: Vec::new(),
        },
        store: FakeStore { has_image: true },
        clock,
    }
}

/// Boot an appliance on a fresh test board
pub fn boot(config: ApplianceConfig, script: &[(u64, Point)]) -> TestAppliance {
    Appliance::boot(board(script), config)
}

/// Step until the clock reaches `until_ms`, asserting the appliance stays awake
pub fn run_until(app: &mut TestAppliance, until_ms: u64) {
    while app.board().clock.now_ms() < until_ms {
        assert_eq!(app.step(), crate::appliance::Step::Continue);
    }
}
