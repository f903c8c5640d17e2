use super::Tick;
use std::fmt;

/// Whoever owned the CPU during one tick.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Occupant {
    Idle,
    Process(String),
}

impl Occupant {
    pub fn pid(&self) -> Option<&str> {
        match self {
            Occupant::Idle => None,
            Occupant::Process(pid) => Some(pid),
        }
    }

    pub fn label(&self) -> &str {
        self.pid().unwrap_or("IDLE")
    }
}

impl fmt::Display for Occupant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A maximal run of consecutive ticks with the same occupant, `[start, end)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    pub start: Tick,
    pub end: Tick,
    pub occupant: Occupant,
}

impl Segment {
    pub fn len(&self) -> Tick {
        self.end - self.start
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Timeline {
    slots: Vec<Occupant>,
}

impl Timeline {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, pid: &str) {
        self.slots.push(Occupant::Process(pid.to_owned()));
    }

    pub fn push_idle(&mut self, ticks: Tick) {
        for _ in 0..ticks {
            self.slots.push(Occupant::Idle);
        }
    }

    pub fn slots(&self) -> &[Occupant] {
        &self.slots
    }

    pub fn len(&self) -> Tick {
        self.slots.len() as Tick
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Number of ticks `pid` held the CPU.
    pub fn ticks_of(&self, pid: &str) -> Tick {
        self.slots
            .iter()
            .filter(|occupant| occupant.pid() == Some(pid))
            .count() as Tick
    }

    pub fn context_switches(&self) -> usize {
        count_context_switches(&self.slots)
    }

    pub fn segments(&self) -> Vec<Segment> {
        compress(&self.slots)
    }
}

/// Counts tick boundaries where the occupant changes. Idle counts as an occupant.
pub fn count_context_switches(slots: &[Occupant]) -> usize {
    slots.windows(2).filter(|pair| pair[0] != pair[1]).count()
}

pub fn compress(slots: &[Occupant]) -> Vec<Segment> {
    let mut segments: Vec<Segment> = Vec::new();
    for (tick, occupant) in slots.iter().enumerate() {
        let tick = tick as Tick;
        match segments.last_mut() {
            Some(segment) if segment.occupant == *occupant => segment.end = tick + 1,
            _ => segments.push(Segment {
                start: tick,
                end: tick + 1,
                occupant: occupant.clone(),
            }),
        }
    }
    segments
}
