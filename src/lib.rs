//! # n64tex
//!
//! Decode N64 texture memory into pixels a host GPU can sample.
//!
//! The console keeps RDRAM as big-endian 32-bit words. Emulators usually
//! byte-swap every word on load so the CPU core can use native loads, which
//! scrambles every narrower access: bytes live at `addr ^ 3`, halfwords at
//! `addr ^ 2`. On top of that, the RDP stores odd rows of some textures with
//! their 32-bit words swapped. This crate undoes both while expanding the
//! console's RGBA, IA, I and CI texel formats into 5650, 5551, 4444, 8888 or
//! indexed host surfaces.
//!
//! ## Core operations (always available)
//!
//! [`convert`] and [`convert_texture`] take a borrowed [`Rdram`] view, a
//! [`SourceTexture`] and a [`DestSurface`] over caller-owned `&mut [u8]`
//! buffers. Nothing is allocated and nothing is cached between calls.
//!
//! ```rust
//! use n64tex::{DestFormat, DestSurface, Rdram, SourceTexture, TexelSize, TextureFormat};
//!
//! // One RGBA16 texel: pure red, opaque (0xF801), stored as a swapped word.
//! let mut console = [0u8; 8];
//! n64tex::load_big_endian(&[0xF8, 0x01, 0x00, 0x00, 0, 0, 0, 0], &mut console).unwrap();
//! let rdram = Rdram::new(&console);
//!
//! let texture = SourceTexture::new(TextureFormat::Rgba, TexelSize::Bits16, 0, 1, 1, 8);
//! let mut pixels = [0u8; 4];
//! let mut dest = DestSurface::new(&mut pixels, 4, DestFormat::Rgba8888);
//! assert!(n64tex::convert(&rdram, &texture, &mut dest));
//! assert_eq!(pixels, [0xFF, 0x00, 0x00, 0xFF]);
//! ```
//!
//! ## Feature flags
//!
//! - **`rgb`**: Decode into `&mut [Rgba<u8>]` from the [`rgb`] crate.
//! - **`imgref`**: Decode whole textures into [`imgref`] `ImgVec`s.
//!   Implies `rgb`.

#![no_std]
#![forbid(unsafe_code)]

#[cfg(feature = "std")]
extern crate std;

extern crate alloc;

mod convert;
mod dispatch;
mod error;
mod format;
mod kernels;
pub mod palette;
pub mod pixel;
mod rdram;
mod rows;

pub use convert::*;
pub use error::ConvertError;
pub use format::*;
pub use rdram::*;

#[cfg(feature = "rgb")]
pub mod typed_rgb;

#[cfg(feature = "imgref")]
pub mod imgref;

#[cfg(test)]
mod tests;
