//! An interactive first-person view of a small scene.
//!
//! Controls:
//! * W, S: move forward and backward
//! * A, D: strafe left and right
//! * Left, Right: turn
//! * Tab: switch between the mesh renderer and the raycaster
//! * F: toggle wireframe overlay
//! * Esc: quit

use std::{error::Error, ops::ControlFlow::Continue};

use minifb::{Key, KeyRepeat};

use re::geom::mesh::tumbling;
use re::prelude::*;
use re_geom::solids::{self, Build, Cube, Floor};

use painter_demos::{MAZE, checkers, window::Window};

fn main() -> Result<(), Box<dyn Error>> {
    let mut win = Window::builder()
        .title("painter // fps")
        .dims((640, 480))
        .build()?;

    let crate_tex = checkers(4, 4, rgb(0xA0, 0x70, 0x40), rgb(0x60, 0x40, 0x20));
    let mut meshes: Vec<Mesh> = (-2..=2)
        .map(|i| {
            Cube { side_len: 1.0 }
                .build()
                .with_texture(crate_tex.clone())
                .with_transform(translate(vec3(3.0 * i as f32, 0.0, 8.0)).to())
        })
        .collect();
    meshes.push(
        solids::Box {
            left_bot_near: vec3(-6.0, -0.5, 12.0),
            right_top_far: vec3(6.0, 2.0, 13.0),
        }
        .build(),
    );
    meshes.push(
        Floor::default()
            .build()
            .with_texture(checkers(2, 8, gray(0.7), gray(0.3)))
            .with_transform(translate(vec3(0.0, -0.5, 0.0)).to()),
    );
    let spinner = meshes.len();
    meshes.push(Cube::default().build());

    let grid = Grid::parse(MAZE)?;
    let mut caster = Caster {
        max_steps: 32,
        ..Caster::new(vec2(1.5, 1.5), degs(30.0))
    };
    let mut cam = Camera3d::default().at(vec3(0.0, 0.5, -4.0));
    let mut raycast = false;

    win.run(|frame| {
        let dt = frame.dt_secs();
        let imp = frame.win;

        if imp.is_key_pressed(Key::Tab, KeyRepeat::No) {
            raycast = !raycast;
        }
        if imp.is_key_pressed(Key::F, KeyRepeat::No) {
            frame.ctx.wireframe = match frame.ctx.wireframe {
                Some(_) => None,
                None => Some(Color3::RED),
            };
        }

        let (mut fwd, mut right, mut turn) = (0.0, 0.0, 0.0);
        for k in imp.get_keys() {
            match k {
                Key::W => fwd += 4.0,
                Key::S => fwd -= 3.0,
                Key::D => right += 3.0,
                Key::A => right -= 3.0,
                Key::Left => turn += 1.0,
                Key::Right => turn -= 1.0,
                _ => {}
            }
        }
        let delta = vec3(right * dt, 0.0, fwd * dt);
        let pose: &mut dyn Pose = if raycast { &mut caster } else { &mut cam };
        pose.translate(delta);
        pose.rotate(rads(2.0 * turn * dt));

        if raycast {
            caster.render(&grid, frame.buf, frame.ctx);
        } else {
            let theta = rads(frame.t.as_secs_f32());
            meshes[spinner].transform = tumbling(theta, vec3(0.0, 1.5, 4.0));
            cam.render(&meshes[..], frame.buf, frame.ctx);
        }
        Continue(())
    })?;
    Ok(())
}
