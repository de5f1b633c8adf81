use tiny_skia as sk;

use crate::dna::{Genome, TriangleGene};

/// Rasterizes genomes at the working resolution.
///
/// Owns its scratch pixmap so repeated renders in the optimization loop do
/// not allocate. Output is un-premultiplied RGBA, matching what the fitness
/// evaluator expects: the canvas is cleared to fully transparent and each
/// triangle is alpha-composited over it in gene order.
pub struct CpuRenderer {
    pix: sk::Pixmap,
    size: u32,
}

impl CpuRenderer {
    pub fn new(size: u32) -> Self {
        let pix = sk::Pixmap::new(size, size).expect("pixmap");
        CpuRenderer { pix, size }
    }

    pub fn size(&self) -> u32 {
        self.size
    }

    /// Render `genome` into `out` as un-premultiplied RGBA8.
    /// `out` is resized to `size * size * 4` bytes. Deterministic: the same
    /// genome always produces byte-identical output.
    pub fn render_into(&mut self, genome: &Genome, out: &mut Vec<u8>) {
        profiling::scope!("render_into");
        self.pix.fill(sk::Color::TRANSPARENT);
        for gene in &genome.genes {
            draw_triangle(&mut self.pix, gene, sk::Transform::identity());
        }
        demultiply_into(&self.pix, out);
    }

    /// Convenience wrapper around [`render_into`](Self::render_into).
    pub fn render(&mut self, genome: &Genome) -> Vec<u8> {
        let mut out = Vec::new();
        self.render_into(genome, &mut out);
        out
    }

    /// One-shot render at an arbitrary display resolution. Geometry is scaled
    /// up from the working resolution; used by display/save collaborators,
    /// never by the optimization loop.
    pub fn render_scaled(genome: &Genome, work_size: u32, out_size: u32) -> Vec<u8> {
        profiling::scope!("render_scaled");
        let mut pix = sk::Pixmap::new(out_size, out_size).expect("pixmap");
        pix.fill(sk::Color::TRANSPARENT);
        let scale = out_size as f32 / work_size as f32;
        let transform = sk::Transform::from_scale(scale, scale);
        for gene in &genome.genes {
            draw_triangle(&mut pix, gene, transform);
        }
        let mut out = Vec::new();
        demultiply_into(&pix, &mut out);
        out
    }
}

fn draw_triangle(pix: &mut sk::Pixmap, gene: &TriangleGene, transform: sk::Transform) {
    let [a, b, c] = gene.points;

    let mut pb = sk::PathBuilder::new();
    pb.move_to(a.x, a.y);
    pb.line_to(b.x, b.y);
    pb.line_to(c.x, c.y);
    pb.close();
    // collinear vertices can produce an empty path; nothing to draw then
    let Some(path) = pb.finish() else { return };

    // channels are clamped here so genes from sources other than the mutation
    // operator still produce a valid paint instead of a panic
    let color = sk::Color::from_rgba(
        (gene.color.r / 255.0).clamp(0.0, 1.0),
        (gene.color.g / 255.0).clamp(0.0, 1.0),
        (gene.color.b / 255.0).clamp(0.0, 1.0),
        gene.color.a.clamp(0.0, 1.0),
    )
    .unwrap();
    let mut paint = sk::Paint::default();
    paint.anti_alias = true;
    paint.shader = sk::Shader::SolidColor(color);

    pix.fill_path(&path, &paint, sk::FillRule::Winding, transform, None);
}

/// tiny-skia stores premultiplied bytes internally; the fitness metric and
/// the diagnostic probe both work on straight RGBA
fn demultiply_into(pix: &sk::Pixmap, out: &mut Vec<u8>) {
    profiling::scope!("demultiply_into");
    let pixels = pix.pixels();
    out.clear();
    out.reserve(pixels.len() * 4);
    for p in pixels {
        let c = p.demultiply();
        out.extend_from_slice(&[c.red(), c.green(), c.blue(), c.alpha()]);
    }
}
