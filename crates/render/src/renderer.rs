use serde::Serialize;

use crate::lighting::LightKind;
use crate::mesh::Primitive;
use crate::record::{FrameSubmission, SceneResources};

/// Counters for one submitted frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DrawStats {
    pub draw_calls: u32,
    /// Vertices or indices consumed across all draws.
    pub elements: u32,
}

impl DrawStats {
    pub fn record(&mut self, elements: u32) {
        self.draw_calls += 1;
        self.elements += elements;
    }
}

/// Renderer-agnostic interface. All renderers implement this trait.
///
/// A renderer consumes a finished [`FrameSubmission`] and issues exactly one
/// draw per record. It never feeds back into simulation state.
pub trait Renderer {
    /// The output type produced by this renderer.
    type Output;

    /// Render one frame.
    fn render(&mut self, frame: &FrameSubmission) -> Self::Output;
}

/// Renders a frame as text, one line per draw call.
///
/// Used by the headless CLI and by tests of the submission step.
#[derive(Debug)]
pub struct DebugTextRenderer<'a> {
    resources: &'a SceneResources,
    stats: DrawStats,
}

impl<'a> DebugTextRenderer<'a> {
    pub fn new(resources: &'a SceneResources) -> Self {
        Self {
            resources,
            stats: DrawStats::default(),
        }
    }

    /// Counters of the most recent frame.
    pub fn stats(&self) -> DrawStats {
        self.stats
    }
}

impl Renderer for DebugTextRenderer<'_> {
    type Output = String;

    fn render(&mut self, frame: &FrameSubmission) -> String {
        self.stats = DrawStats::default();
        let mut out = String::new();
        let [r, g, b, _] = frame.clear_color;
        out.push_str(&format!("=== Frame (draws={}) ===\n", frame.draw_calls()));
        out.push_str(&format!("Clear: ({r:.2}, {g:.2}, {b:.2})\n"));
        out.push_str(&format!(
            "Camera: eye=({:.2}, {:.2}, {:.2})\n",
            frame.view_pos.x, frame.view_pos.y, frame.view_pos.z
        ));
        match frame.light.map(|light| light.kind) {
            None => out.push_str("Light: none\n"),
            Some(LightKind::Directional { direction: d }) => out.push_str(&format!(
                "Light: directional dir=({:.2}, {:.2}, {:.2})\n",
                d.x, d.y, d.z
            )),
            Some(LightKind::Point { position: p, .. }) => out.push_str(&format!(
                "Light: point pos=({:.2}, {:.2}, {:.2})\n",
                p.x, p.y, p.z
            )),
        }
        out.push_str(if frame.wireframe {
            "Polygons: wireframe\n"
        } else {
            "Polygons: fill\n"
        });

        for record in &frame.records {
            let p = record.position();
            let draw = match self.resources.mesh(record.mesh) {
                Some(mesh) => {
                    self.stats.record(mesh.draw_count());
                    let kind = match (mesh.primitive(), mesh.is_indexed()) {
                        (Primitive::Points, _) => "points",
                        (Primitive::Triangles, true) => "indexed",
                        (Primitive::Triangles, false) => "triangles",
                    };
                    format!("{} {kind}", mesh.draw_count())
                }
                None => "? missing".to_string(),
            };
            out.push_str(&format!(
                "  [{}] shader={} draw={} pos=({:.2}, {:.2}, {:.2})\n",
                record.label, record.shader, draw, p.x, p.y, p.z
            ));
        }

        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::camera::Camera;
    use crate::mesh::{MeshData, MeshId, VertexLayout};
    use crate::record::RenderRecord;
    use crate::shader::ShaderKind;
    use glam::{Mat4, Vec3};

    #[test]
    fn empty_frame() {
        let res = SceneResources::new();
        let mut renderer = DebugTextRenderer::new(&res);
        let frame = FrameSubmission::new([0.2, 0.3, 0.3, 1.0], &Camera::default(), 1.0);
        let output = renderer.render(&frame);

        assert!(output.contains("draws=0"));
        assert!(output.contains("Clear: (0.20, 0.30, 0.30)"));
        assert!(output.contains("Light: none"));
        assert!(output.contains("Polygons: fill"));
        assert_eq!(renderer.stats(), DrawStats::default());
    }

    #[test]
    fn one_line_per_record() {
        let mut res = SceneResources::new();
        let quad = res.add_mesh(MeshData::quad(20.0, 1.0));
        let ball = res.add_mesh(MeshData::point());
        let cube = res.add_mesh(MeshData::unit_cube(VertexLayout::Position));

        let mut frame = FrameSubmission::new([0.0; 4], &Camera::default(), 1.0);
        frame.push(RenderRecord::new(
            "paddle",
            quad,
            ShaderKind::Flat,
            Mat4::from_translation(Vec3::new(0.0, -20.0, 0.0)),
        ));
        frame.push(RenderRecord::new("ball", ball, ShaderKind::Flat, Mat4::IDENTITY));
        frame.push(RenderRecord::new(
            "far away",
            cube,
            ShaderKind::Flat,
            Mat4::from_translation(Vec3::new(1e4, 0.0, 0.0)),
        ));

        let mut renderer = DebugTextRenderer::new(&res);
        let output = renderer.render(&frame);

        assert!(output.contains("[paddle] shader=flat draw=6 indexed pos=(0.00, -20.00, 0.00)"));
        assert!(output.contains("[ball] shader=flat draw=1 points"));
        assert!(output.contains("[far away] shader=flat draw=36 triangles"));
        assert_eq!(
            renderer.stats(),
            DrawStats {
                draw_calls: 3,
                elements: 43
            }
        );
    }

    #[test]
    fn missing_mesh_still_listed() {
        let res = SceneResources::new();
        let mut frame = FrameSubmission::new([0.0; 4], &Camera::default(), 1.0);
        frame.push(RenderRecord::new("ghost", MeshId(3), ShaderKind::Flat, Mat4::IDENTITY));
        let output = DebugTextRenderer::new(&res).render(&frame);
        assert!(output.contains("[ghost] shader=flat draw=? missing"));
    }

    #[test]
    fn point_light_line() {
        let res = SceneResources::new();
        let frame = FrameSubmission::new([0.0; 4], &Camera::default(), 1.0).with_light(
            crate::Light::point(Vec3::new(0.0, 0.0, 2.0), crate::Attenuation::RANGE_50),
        );
        let output = DebugTextRenderer::new(&res).render(&frame);
        assert!(output.contains("Light: point pos=(0.00, 0.00, 2.00)"));
    }

    #[test]
    fn wireframe_frame_is_reported() {
        let mut res = SceneResources::new();
        let cube = res.add_mesh(MeshData::unit_cube(VertexLayout::Position));
        let mut frame =
            FrameSubmission::new([0.0; 4], &Camera::default(), 1.0).with_wireframe(true);
        frame.push(RenderRecord::new("cube", cube, ShaderKind::Flat, Mat4::IDENTITY));

        let mut renderer = DebugTextRenderer::new(&res);
        let output = renderer.render(&frame);
        assert!(output.contains("Polygons: wireframe"));
        assert_eq!(renderer.stats().draw_calls, 1);
    }
}
