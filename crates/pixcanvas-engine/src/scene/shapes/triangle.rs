use crate::coords::Pixel;
use crate::palette::ColorIndex;
use crate::scene::{CommandBatch, Param, ShapeKind};

impl CommandBatch {
    /// Records a filled triangle. Uses two parameter records.
    pub fn push_triangle(&mut self, color: ColorIndex, depth: i16, a: Pixel, b: Pixel, c: Pixel) -> bool {
        let head = Param::new(
            ShapeKind::Triangle,
            color.0 as u16,
            0,
            depth,
            [a.x as i32, a.y as i32, b.x as i32, b.y as i32, 0],
        );
        let tail = Param::extra(ShapeKind::Triangle, [c.x as i32, c.y as i32, 0, 0, 0]);
        self.push(ShapeKind::Triangle, &[head, tail])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn third_vertex_lives_in_second_record() {
        let mut batch = CommandBatch::default();
        batch.push_triangle(ColorIndex(2), 4, Pixel::new(1, 2), Pixel::new(3, 4), Pixel::new(5, 6));

        let params = batch.params();
        assert_eq!(params.len(), 2);
        assert_eq!(params[0].data[..4], [1, 2, 3, 4]);
        assert_eq!(params[1].data[..2], [5, 6]);
        assert_eq!(batch.commands()[0].vertex_count, 3);
    }
}
