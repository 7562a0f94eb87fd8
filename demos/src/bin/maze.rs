//! Renders a view of a maze with the raycaster, and saves the image in
//! PPM format.
//!
//! Usage: `maze [OUTPUT.ppm]`

use std::{env, error::Error};

use re::prelude::*;
use re::util::pnm::save_ppm;

use painter_demos::MAZE;

fn main() -> Result<(), Box<dyn Error>> {
    let out = env::args().nth(1).unwrap_or_else(|| "maze.ppm".into());

    let grid = Grid::parse(MAZE)?;
    let caster = Caster {
        max_steps: 32,
        ..Caster::new(vec2(1.5, 1.5), degs(30.0))
    };
    let ctx = Context {
        color_clear: Some(gray(0.15)),
        ..Context::default()
    };
    let mut buf = Buf2::<Color3>::new_default((320, 200));
    caster.render(&grid, &mut buf, &ctx);

    save_ppm(&out, &buf)?;
    eprintln!("{}", ctx.stats.borrow());
    eprintln!("Wrote {out}");
    Ok(())
}
