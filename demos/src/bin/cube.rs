//! Renders a textured cube standing over a checkered floor, and saves the
//! image in PPM format.
//!
//! Usage: `cube [OUTPUT.ppm] [TEXTURE.ppm] [MODEL.obj]`
//!
//! If a model is given, it is drawn instead of the cube.

use std::{env, error::Error};

use re::prelude::*;
use re::util::pnm::save_ppm;
use re_geom::io::load_obj;
use re_geom::solids::{Build, Cube, Floor};

use painter_demos::{checkers, texture_or};

fn main() -> Result<(), Box<dyn Error>> {
    let args: Vec<String> = env::args().skip(1).collect();
    let out = args.first().map_or("cube.ppm", String::as_str);
    let tex = texture_or(args.get(1).map(String::as_str), Texture::fallback());

    let model = match args.get(2) {
        Some(path) => load_obj(path)?,
        None => Cube { side_len: 2.0 }.build(),
    };
    let model = model
        .with_texture(tex)
        .tumbling(degs(75.0), vec3(0.0, 0.5, 0.0));

    let floor = Floor::default()
        .build()
        .with_texture(checkers(2, 8, gray(0.8), gray(0.3)))
        .with_transform(translate(vec3(0.0, -1.5, 0.0)).to());

    let cam = Camera3d::default().at(vec3(0.0, 1.0, -6.0));
    let ctx = Context::default();
    let mut buf = Buf2::<Color3>::new_default((800, 600));
    cam.render(&[floor, model][..], &mut buf, &ctx);

    save_ppm(out, &buf)?;
    eprintln!("{}", ctx.stats.borrow());
    eprintln!("Wrote {out}");
    Ok(())
}
