use sdl2::pixels::PixelFormatEnum;
use sdl2::render::{Canvas, TextureCreator};
use sdl2::video::{Window, WindowContext};

pub struct Video {
    canvas: Canvas<Window>,
    texture_creator: TextureCreator<WindowContext>,
    width: u32,
    height: u32,
    scratch: Vec<u8>,
}

impl Video {
    /// Create an SDL window and renderer for the given native resolution.
    /// Failure here is fatal; failures while presenting are not.
    pub fn new(
        sdl_video: &sdl2::VideoSubsystem,
        title: &str,
        native_width: u32,
        native_height: u32,
        scale: u32,
    ) -> Self {
        let window = sdl_video
            .window(title, native_width * scale, native_height * scale)
            .position_centered()
            .build()
            .expect("Failed to create window");

        let canvas = window
            .into_canvas()
            .accelerated()
            .build()
            .expect("Failed to create canvas");

        let texture_creator = canvas.texture_creator();

        Self {
            canvas,
            texture_creator,
            width: native_width,
            height: native_height,
            scratch: vec![0; (native_width * native_height * 4) as usize],
        }
    }

    /// Upload an ARGB32 framebuffer to the texture and present it.
    /// Pixels are 0xAARRGGBB words; ARGB8888 stores them little-endian.
    /// A failed frame produces no output but is not fatal.
    pub fn present(&mut self, framebuffer: &[u32]) -> Result<(), String> {
        for (chunk, &px) in self.scratch.chunks_exact_mut(4).zip(framebuffer) {
            chunk.copy_from_slice(&px.to_le_bytes());
        }

        let mut texture = self
            .texture_creator
            .create_texture_streaming(PixelFormatEnum::ARGB8888, self.width, self.height)
            .map_err(|e| e.to_string())?;

        texture
            .update(None, &self.scratch, (self.width * 4) as usize)
            .map_err(|e| e.to_string())?;

        self.canvas.clear();
        self.canvas.copy(&texture, None, None)?;
        self.canvas.present();
        Ok(())
    }
}
