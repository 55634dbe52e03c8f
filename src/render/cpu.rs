use crate::foundation::{
    core::{Canvas, Point},
    error::CoverResult,
};

pub(crate) fn point_to_cpu(p: Point) -> vello_cpu::kurbo::Point {
    vello_cpu::kurbo::Point::new(p.x, p.y)
}

pub(crate) fn bezpath_to_cpu(path: &kurbo::BezPath) -> vello_cpu::kurbo::BezPath {
    use kurbo::PathEl;

    let mut out = vello_cpu::kurbo::BezPath::new();
    for &el in path.elements() {
        match el {
            PathEl::MoveTo(p) => out.move_to(point_to_cpu(p)),
            PathEl::LineTo(p) => out.line_to(point_to_cpu(p)),
            PathEl::QuadTo(p1, p2) => out.quad_to(point_to_cpu(p1), point_to_cpu(p2)),
            PathEl::CurveTo(p1, p2, p3) => {
                out.curve_to(point_to_cpu(p1), point_to_cpu(p2), point_to_cpu(p3));
            }
            PathEl::ClosePath => out.close_path(),
        }
    }
    out
}

/// Rasterize `draw` into a fresh transparent pixmap the size of `canvas`.
pub(crate) fn render_layer<F>(canvas: Canvas, draw: F) -> CoverResult<vello_cpu::Pixmap>
where
    F: FnOnce(&mut vello_cpu::RenderContext) -> CoverResult<()>,
{
    let (w, h) = canvas.dims_u16()?;
    let mut ctx = vello_cpu::RenderContext::new(w, h);
    draw(&mut ctx)?;
    ctx.flush();
    let mut pixmap = vello_cpu::Pixmap::new(w, h);
    ctx.render_to_pixmap(&mut pixmap);
    Ok(pixmap)
}
