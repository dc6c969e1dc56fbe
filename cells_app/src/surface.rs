// surface.rs - egui image the automaton paints into, uploaded as a texture

use cells::{Color, PixelSurface};
use egui::{Color32, ColorImage, TextureHandle, TextureOptions};

pub struct TextureSurface {
    image: ColorImage,
    dirty: bool,
}

impl TextureSurface {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            image: ColorImage::new([width, height], Color32::BLACK),
            dirty: true,
        }
    }

    /// Uploads the image if anything was painted since the last upload.
    pub fn sync(&mut self, ctx: &egui::Context, texture: &mut Option<TextureHandle>) {
        if !self.dirty && texture.is_some() {
            return;
        }
        match texture {
            Some(handle) => handle.set(self.image.clone(), TextureOptions::NEAREST),
            None => {
                *texture = Some(ctx.load_texture("cells", self.image.clone(), TextureOptions::NEAREST));
            }
        }
        self.dirty = false;
    }
}

impl PixelSurface for TextureSurface {
    fn width(&self) -> usize {
        self.image.size[0]
    }

    fn height(&self) -> usize {
        self.image.size[1]
    }

    fn get_pixel(&self, x: usize, y: usize) -> Color {
        Color::from(self.image.pixels[y * self.width() + x].to_srgba_unmultiplied())
    }

    fn set_pixel(&mut self, x: usize, y: usize, color: Color) {
        let width = self.width();
        self.image.pixels[y * width + x] =
            Color32::from_rgba_unmultiplied(color.r, color.g, color.b, color.a);
        self.dirty = true;
    }

    fn fill(&mut self, color: Color) {
        let color = Color32::from_rgba_unmultiplied(color.r, color.g, color.b, color.a);
        self.image.pixels.fill(color);
        self.dirty = true;
    }
}
