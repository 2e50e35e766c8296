use crate::assets::PictureId;
use crate::coords::Pixel;
use crate::scene::{CommandBatch, Param, ShapeKind};

impl CommandBatch {
    /// Records a picture with its top-left at `pos`.
    #[inline]
    pub fn push_picture(&mut self, picture: PictureId, depth: i16, pos: Pixel) -> bool {
        let data = [picture.index() as i32, pos.x as i32, pos.y as i32, 0, 0];
        self.push(
            ShapeKind::Picture,
            &[Param::new(ShapeKind::Picture, 0, 0, depth, data)],
        )
    }
}
