//! The demo scenes rendered by the binary.

use anyhow::{Context, Result};
use log::info;

use tinyrender::prelude::*;

/// Light-space ortho box half size; covers the floor.
const SHADOW_EXTENT: f32 = 7.0;
/// Distance of the shadow camera from the scene target.
const SHADOW_DISTANCE: f32 = 15.0;

/// Geometry and textures shared by the scenes.
pub struct Scene {
    floor: TriangleMesh,
    boxes: Vec<TriangleMesh>,
    window: TriangleMesh,
    floor_texture: Texture,
    box_texture: Texture,
    glass: Texture,
    ripples: Texture,
    speckles: Texture,
}

impl Scene {
    pub fn new() -> Self {
        let mut window = TriangleMesh::new("window");
        window.add_quad([
            Vec3::new(-1.8, 0.0, 2.2),
            Vec3::new(1.8, 0.0, 2.2),
            Vec3::new(1.8, 2.6, 2.2),
            Vec3::new(-1.8, 2.6, 2.2),
        ]);

        Self {
            floor: TriangleMesh::quad("floor", 5.0, 0.0),
            boxes: vec![
                TriangleMesh::cuboid("tall box", Vec3::new(-1.5, 0.0, -1.0), Vec3::new(-0.5, 2.0, 0.0)),
                TriangleMesh::cuboid("wide box", Vec3::new(0.3, 0.0, -0.2), Vec3::new(1.7, 0.8, 1.0)),
            ],
            window,
            floor_texture: Texture::checkerboard(256, 16, Color::gray(0.9), Color::gray(0.35)),
            box_texture: Texture::solid(Color::rgb(0.8, 0.45, 0.3)),
            // Tinted glass panes separated by open cells.
            glass: Texture::checkerboard(64, 4, Color::new(0.3, 0.6, 1.0, 0.45), Color::TRANSPARENT),
            ripples: ripple_normal_map(128),
            speckles: Texture::checkerboard(64, 8, Color::gray(0.2), Color::gray(0.02)),
        }
    }
}

/// Tangent-space normals bending along u in a sine pattern.
fn ripple_normal_map(size: u32) -> Texture {
    Texture::from_fn(size, size, |x, _| {
        let phase = x as f32 / size as f32 * std::f32::consts::TAU * 8.0;
        let n = Vec3::new(0.35 * phase.sin(), 0.0, 1.0).normalize();
        Color::rgb(n.x * 0.5 + 0.5, n.y * 0.5 + 0.5, n.z * 0.5 + 0.5)
    })
}

fn identity(camera: &Camera) -> Transforms {
    Transforms::new(Mat4::identity(), camera.view_projection())
}

/// A textured floor and shaded boxes, drawn with the configured AA format.
pub fn msaa(config: &RenderConfig, scene: &Scene) -> Result<()> {
    let camera = config.camera();
    let light = Light::directional(config.light_direction);
    let mut renderer = Renderer::new(config.width, config.height, config.anti_aliasing, config.background);

    let floor = TexturedShader::new(identity(&camera), &scene.floor_texture);
    renderer.draw(&scene.floor, &floor, false);

    let boxes = GouraudShader::new(identity(&camera), light, Color::rgb(0.8, 0.45, 0.3));
    for mesh in &scene.boxes {
        renderer.draw(mesh, &boxes, false);
    }

    let path = config.output_dir.join("msaa.tga");
    renderer
        .save_color(&path)
        .with_context(|| format!("writing {}", path.display()))?;
    log_stats("msaa", &renderer);
    Ok(())
}

/// Shadow pass from a directional light, then a Blinn-Phong pass with PCF
/// shadows and a blended glass window drawn last.
pub fn alpha_blend(config: &RenderConfig, scene: &Scene) -> Result<()> {
    let direction = config.light_direction.normalize();
    let light = Light::directional(direction);

    let up = if direction.dot(Vec3::UP).abs() > 0.99 {
        Vec3::new(0.0, 0.0, -1.0)
    } else {
        Vec3::UP
    };
    let light_camera = Camera::new(
        config.target - direction * SHADOW_DISTANCE,
        config.target,
        Projection::orthographic(SHADOW_EXTENT, SHADOW_EXTENT, 1.0, SHADOW_DISTANCE * 3.0),
    )
    .with_up(up);
    let light_view_proj = light_camera.view_projection();

    let size = config.shadow_map_size;
    let mut shadow_pass = Renderer::new(size, size, AntiAliasing::Noaa, Color::BLACK);
    let depth = DepthShader::new(Transforms::new(Mat4::identity(), light_view_proj));
    shadow_pass.draw_depth_only(&scene.floor, &depth);
    for mesh in &scene.boxes {
        shadow_pass.draw_depth_only(mesh, &depth);
    }

    let path = config.output_dir.join("shadow_map.tga");
    shadow_pass
        .save_depth(&path)
        .with_context(|| format!("writing {}", path.display()))?;
    let shadow_map = ShadowMap::from_depth_buffer(shadow_pass.depth_buffer());
    let shadow = ShadowQuery {
        map: &shadow_map,
        light_view_proj,
        settings: config.shadow,
    };

    let camera = config.camera();
    let mut renderer = Renderer::new(config.width, config.height, config.anti_aliasing, config.background);

    let floor = PhongShader::new(identity(&camera), camera.eye, light, &scene.floor_texture)
        .with_normal_map(&scene.ripples)
        .with_shadow(shadow);
    renderer.draw(&scene.floor, &floor, false);

    let boxes = PhongShader::new(identity(&camera), camera.eye, light, &scene.box_texture)
        .with_specular_map(&scene.speckles)
        .with_shadow(shadow);
    for mesh in &scene.boxes {
        renderer.draw(mesh, &boxes, false);
    }

    let glass = TexturedShader::new(identity(&camera), &scene.glass);
    renderer.draw(&scene.window, &glass, true);

    let path = config.output_dir.join("alpha_blend.tga");
    renderer
        .save_color(&path)
        .with_context(|| format!("writing {}", path.display()))?;
    log_stats("alpha blend", &renderer);
    Ok(())
}

/// Blinn-Phong lit by a point light, with a marker cube at the light and an
/// optional OBJ model from the config.
pub fn point_light(config: &RenderConfig, scene: &Scene) -> Result<()> {
    let camera = config.camera();
    let light = Light::point(config.point_light);
    let mut renderer = Renderer::new(config.width, config.height, config.anti_aliasing, Color::BLACK);

    let floor = PhongShader::new(identity(&camera), camera.eye, light, &scene.floor_texture)
        .with_ambient(0.03);
    renderer.draw(&scene.floor, &floor, false);

    let boxes = PhongShader::new(identity(&camera), camera.eye, light, &scene.box_texture)
        .with_specular_map(&scene.speckles)
        .with_ambient(0.03);
    for mesh in &scene.boxes {
        renderer.draw(mesh, &boxes, false);
    }

    if let Some(path) = &config.model {
        let model = Model::from_obj(path).with_context(|| format!("loading {}", path.display()))?;
        let texture = match &config.model_texture {
            Some(path) => Texture::from_file(path)
                .with_context(|| format!("loading {}", path.display()))?
                .blurred(),
            None => Texture::solid(Color::gray(0.8)),
        };
        let placement = Transform::at(Vec3::new(-2.5, 0.0, 2.0)).rotated_y(0.6);
        let transforms = Transforms::new(placement.matrix(), camera.view_projection());
        let shader = PhongShader::new(transforms, camera.eye, light, &texture).with_ambient(0.03);
        for mesh in model.meshes() {
            renderer.draw(mesh, &shader, false);
        }
    }

    let marker = TriangleMesh::cuboid("light marker", Vec3::ONE * -0.1, Vec3::ONE * 0.1);
    let at_light = Transforms::new(Transform::at(config.point_light).matrix(), camera.view_projection());
    renderer.draw(&marker, &UnlitShader::new(at_light, Color::rgb(1.0, 0.95, 0.6)), false);

    let path = config.output_dir.join("point_light.tga");
    renderer
        .save_color(&path)
        .with_context(|| format!("writing {}", path.display()))?;
    log_stats("point light", &renderer);
    Ok(())
}

fn log_stats(name: &str, renderer: &Renderer) {
    let stats = renderer.stats();
    info!(
        "{name}: {} triangles, {} fragments shaded, {} discarded",
        stats.triangles, stats.fragments, stats.discarded
    );
}
