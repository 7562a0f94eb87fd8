use criterion::*;

use re::prelude::*;
use re::render::{
    clip::{clip_to_screen, clip_tri, near_plane},
    ctx::DepthSort,
    raster::{ScreenVert, tri_fill},
    vis,
};
use re_geom::solids::{Build, Cube, Floor};

const W: u32 = 256;

fn screen_tri(size: f32) -> [ScreenVert; 3] {
    [(0.1, 0.1), (0.9, 0.3), (0.4, 0.9)]
        .map(|(x, y)| vertex(vec3(x * size, y * size, 0.5), uvw(x, y, 1.0)))
}

fn fill(c: &mut Criterion) {
    let mut group = c.benchmark_group("fill");
    let tex = Texture::fallback();
    for size in [16.0, 64.0, 256.0] {
        let mut buf = Buf2::<Color3>::new_default((W, W));
        let ctx = Context::default();
        let verts = screen_tri(size);
        group.bench_function(BenchmarkId::new("textured", size), |b| {
            b.iter(|| {
                tri_fill(black_box(verts), |sl| {
                    buf.rasterize(
                        sl,
                        |f| tex.sample(f.uv().u(), f.uv().v()),
                        &ctx,
                    );
                })
            })
        });
    }
    group.finish();
}

fn clip(c: &mut Criterion) {
    let near = near_plane(0.1);
    let crossing = tri(
        vertex(vec3::<View>(0.0, 0.0, -1.0), uv(0.0, 0.0)),
        vertex(vec3(1.0, 0.0, 1.0), uv(1.0, 0.0)),
        vertex(vec3(0.0, 1.0, 1.0), uv(0.0, 1.0)),
    );
    c.bench_function("clip_near", |b| {
        b.iter(|| clip_tri(&near, black_box(crossing)))
    });

    let big = tri(
        vertex(vec3::<Screen>(-100.0, -50.0, 0.5), uvw(0.0, 0.0, 1.0)),
        vertex(vec3(400.0, 100.0, 0.5), uvw(1.0, 0.0, 1.0)),
        vertex(vec3(100.0, 500.0, 0.5), uvw(0.0, 1.0, 1.0)),
    );
    let mut out = Vec::new();
    c.bench_function("clip_screen", |b| {
        b.iter(|| {
            out.clear();
            clip_to_screen(black_box(big), (W, W), &mut out);
        })
    });
}

fn sort(c: &mut Criterion) {
    let depths: Vec<f32> =
        (0..1000).map(|i| ((i * 7919) % 1000) as f32).collect();
    c.bench_function("depth_sort_1000", |b| {
        b.iter_batched(
            || depths.clone(),
            |mut ds| {
                vis::depth_sort(&mut ds, DepthSort::BackToFront, |d| *d);
                ds
            },
            BatchSize::SmallInput,
        )
    });
}

fn render(c: &mut Criterion) {
    let meshes = [
        Floor::default()
            .build()
            .with_transform(translate(vec3(0.0, -1.0, 0.0)).to()),
        Cube { side_len: 2.0 }
            .build()
            .tumbling(degs(30.0), vec3(0.0, 0.0, 0.0)),
    ];
    let cam = Camera3d::default().at(vec3(0.0, 1.0, -5.0));
    let mut buf = Buf2::<Color3>::new_default((W, W));
    let ctx = Context::default();

    c.bench_function("render_scene", |b| {
        b.iter(|| cam.render(&meshes[..], &mut buf, &ctx))
    });
    eprintln!("{}", ctx.stats.borrow().per_frame());
}

fn raycast(c: &mut Criterion) {
    let grid = Grid::parse(
        "########\n\
         #......#\n\
         #..##..#\n\
         #......#\n\
         ########",
    )
    .unwrap();
    let caster = Caster::new(vec2(1.5, 1.5), degs(20.0));
    let mut buf = Buf2::<Color3>::new_default((W, W));
    let ctx = Context::default();

    c.bench_function("raycast_frame", |b| {
        b.iter(|| caster.render(&grid, &mut buf, &ctx))
    });
}

criterion_group!(benches, fill, clip, sort, render, raycast);
criterion_main!(benches);
