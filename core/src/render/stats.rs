//! Rendering statistics.

use alloc::{format, string::String};
use core::fmt::{self, Display, Formatter};
use core::ops::AddAssign;
use core::time::Duration;
#[cfg(feature = "std")]
use std::time::Instant;

//
// Types
//

/// Collects and accumulates rendering statistics and performance data.
///
/// Each render call records its own `Stats` and appends them to the
/// record kept in [`Context::stats`][super::ctx::Context::stats].
#[derive(Clone, Debug, Default)]
pub struct Stats {
    /// Time spent rendering.
    pub time: Duration,
    /// Number of render calls issued.
    pub calls: f32,
    /// Number of frames rendered.
    pub frames: f32,

    /// Meshes submitted, and meshes with at least one triangle drawn.
    pub objs: Throughput,
    /// Faces submitted, and triangles that reached the rasterizer.
    pub prims: Throughput,
    /// Pixels covered, and pixels written.
    pub frags: Throughput,

    #[cfg(feature = "std")]
    start: Option<Instant>,
}

/// Counts of items going into and coming out of a pipeline stage.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct Throughput {
    /// Count of items submitted.
    pub i: usize,
    /// Count of items output.
    pub o: usize,
}

//
// Impls
//

impl Stats {
    /// Creates a new zeroed `Stats` instance.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a `Stats` instance that records the time of its creation.
    ///
    /// Call [`finish`][Self::finish] to write the elapsed time to
    /// `self.time`. Equivalent to [`Stats::new`] without the `std` feature.
    pub fn start() -> Self {
        Self {
            #[cfg(feature = "std")]
            start: Some(Instant::now()),
            ..Self::default()
        }
    }

    /// Stops the timer and records the elapsed time to `self.time`.
    ///
    /// No-op if the timer was not running, or without the `std` feature.
    #[must_use]
    pub fn finish(self) -> Self {
        Self {
            #[cfg(feature = "std")]
            time: self.start.map_or(self.time, |st| st.elapsed()),
            #[cfg(feature = "std")]
            start: None,
            ..self
        }
    }

    /// Returns the average counts per second of rendering time.
    ///
    /// If no time has been recorded, the totals are returned as they are.
    pub fn per_sec(&self) -> Self {
        let secs = if self.time.is_zero() {
            1.0
        } else {
            self.time.as_secs_f32()
        };
        let [objs, prims, frags] = self.throughput().map(|t| Throughput {
            i: (t.i as f32 / secs) as usize,
            o: (t.o as f32 / secs) as usize,
        });
        Self {
            time: Duration::from_secs(1),
            calls: self.calls / secs,
            frames: self.frames / secs,
            objs,
            prims,
            frags,
            ..Self::default()
        }
    }

    /// Returns the average counts per frame.
    pub fn per_frame(&self) -> Self {
        let frames = self.frames.max(1.0);
        let n = frames as usize;
        let [objs, prims, frags] = self
            .throughput()
            .map(|t| Throughput { i: t.i / n, o: t.o / n });
        Self {
            time: self.time.div_f32(frames),
            calls: self.calls / frames,
            frames: 1.0,
            objs,
            prims,
            frags,
            ..Self::default()
        }
    }

    fn throughput(&self) -> [Throughput; 3] {
        [self.objs, self.prims, self.frags]
    }
}

impl Display for Stats {
    #[inline(never)]
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        const W: usize = 16;
        let (per_s, per_f) = (self.per_sec(), self.per_frame());
        let rule = format!("{:─<w$}", "", w = 8 + 3 * W + 6);

        writeln!(
            f,
            " {:6} {:>W$} │ {:>W$} │ {:>W$}",
            "STATS", "TOTAL", "PER SEC", "PER FRAME"
        )?;
        writeln!(f, "{rule}")?;
        let (tot, avg) = (human_time(self.time), human_time(per_f.time));
        writeln!(f, " {:6} {tot:>W$} │ {:>W$} │ {avg:>W$}", "time", "")?;
        writeln!(
            f,
            " {:6} {:>W$} │ {:>W$.1} │ {:>W$.1}",
            "calls", self.calls, per_s.calls, per_f.calls
        )?;
        writeln!(
            f,
            " {:6} {:>W$} │ {:>W$.1} │",
            "frames", self.frames, per_s.frames
        )?;
        writeln!(f, "{rule}")?;

        let labels = ["objs", "prims", "frags"];
        let rows = self
            .throughput()
            .into_iter()
            .zip(per_s.throughput())
            .zip(per_f.throughput());
        for (lbl, ((tot, s), fr)) in labels.into_iter().zip(rows) {
            writeln!(f, " {lbl:6} {tot:>W$} │ {s:>W$} │ {fr:>W$}")?;
        }
        Ok(())
    }
}

impl Display for Throughput {
    #[inline(never)]
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        if f.alternate() {
            // Percentage of items passed through
            let s = if self.i == 0 {
                "--".into()
            } else {
                format!("{:.1}%", 100.0 * self.o as f32 / self.i as f32)
            };
            f.pad(&s)
        } else {
            f.pad(&format!("{} / {}", human_num(self.i), human_num(self.o)))
        }
    }
}

impl AddAssign for Stats {
    /// Appends the stats of `other` to `self`.
    fn add_assign(&mut self, other: Self) {
        self.time += other.time;
        self.calls += other.calls;
        self.frames += other.frames;
        self.objs += other.objs;
        self.prims += other.prims;
        self.frags += other.frags;
    }
}

impl AddAssign for Throughput {
    fn add_assign(&mut self, rhs: Self) {
        self.i += rhs.i;
        self.o += rhs.o;
    }
}

fn human_num(n: usize) -> String {
    match n {
        0..1_000 => format!("{n}"),
        1_000..1_000_000 => format!("{:.1}k", n as f32 / 1e3),
        1_000_000..1_000_000_000 => format!("{:.1}M", n as f32 / 1e6),
        _ => format!("{:.1}G", n as f32 / 1e9),
    }
}

fn human_time(d: Duration) -> String {
    let secs = d.as_secs_f32();
    if secs < 1e-3 {
        format!("{:.1}µs", secs * 1e6)
    } else if secs < 1.0 {
        format!("{:.1}ms", secs * 1e3)
    } else {
        format!("{secs:.2}s")
    }
}
