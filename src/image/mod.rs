extern crate image as image_rs;
extern crate nalgebra as na;

use image_rs::RgbImage;
use na::DMatrix;

use crate::Float;
use self::image_encoding::ImageEncoding;


pub mod image_encoding;

/**
 * A (height, width, channels) array. Each channel is stored as its own
 * height x width matrix so that stacking along the channel axis is a
 * concatenation of the channel lists.
 */
#[derive(Debug,Clone,PartialEq)]
pub struct Frame {
    pub channels: Vec<DMatrix<Float>>,
    pub original_encoding: ImageEncoding
}

impl Frame {

    pub fn from_channels(channels: Vec<DMatrix<Float>>, original_encoding: ImageEncoding) -> Frame {
        assert!(!channels.is_empty());
        let shape = channels[0].shape();
        assert!(channels.iter().all(|c| c.shape() == shape));
        Frame { channels, original_encoding }
    }

    pub fn zeros(height: usize, width: usize, channel_count: usize, original_encoding: ImageEncoding) -> Frame {
        let channels = (0..channel_count).map(|_| DMatrix::<Float>::zeros(height,width)).collect::<Vec<DMatrix<Float>>>();
        Frame::from_channels(channels, original_encoding)
    }

    pub fn zeros_like(&self) -> Frame {
        let (height, width, channel_count) = self.shape();
        Frame::zeros(height, width, channel_count, self.original_encoding)
    }

    pub fn from_rgb_image(image: &RgbImage) -> Frame {
        let (width, height) = image.dimensions();
        let mut channels = vec![DMatrix::<Float>::zeros(height as usize, width as usize); 3];
        for (x, y, pixel) in image.enumerate_pixels() {
            for (c, value) in pixel.0.iter().enumerate() {
                channels[c][(y as usize, x as usize)] = *value as Float;
            }
        }
        Frame::from_channels(channels, ImageEncoding::U8)
    }

    pub fn height(&self) -> usize {
        self.channels[0].nrows()
    }

    pub fn width(&self) -> usize {
        self.channels[0].ncols()
    }

    pub fn channel_count(&self) -> usize {
        self.channels.len()
    }

    /// (height, width, channels)
    pub fn shape(&self) -> (usize,usize,usize) {
        (self.height(), self.width(), self.channel_count())
    }

    pub fn get(&self, row: usize, col: usize, channel: usize) -> Float {
        self.channels[channel][(row,col)]
    }

    pub fn is_zero(&self) -> bool {
        self.channels.iter().all(|c| c.iter().all(|&v| v == 0.0))
    }

    /**
     * Stacks two frames of equal height and width along the channel axis.
     */
    pub fn dstack(first: &Frame, second: &Frame) -> Frame {
        assert_eq!((first.height(),first.width()),(second.height(),second.width()));
        let channels = first.channels.iter().chain(second.channels.iter()).cloned().collect::<Vec<DMatrix<Float>>>();
        Frame::from_channels(channels, ImageEncoding::F64)
    }

    /**
     * Sum of all frames divided by `divisor`. The divisor is passed in rather
     * than taken from `frames.len()` since callers normalize by the requested
     * window length.
     */
    pub fn average(frames: &[Frame], divisor: Float) -> Frame {
        assert!(!frames.is_empty());
        let mut sum = frames[0].zeros_like();
        for frame in frames {
            assert_eq!(frame.shape(), sum.shape());
            for (acc, c) in sum.channels.iter_mut().zip(frame.channels.iter()) {
                *acc += c;
            }
        }
        for c in sum.channels.iter_mut() {
            *c /= divisor;
        }
        sum.original_encoding = ImageEncoding::F64;
        sum
    }

    pub fn subtract(&self, other: &Frame) -> Frame {
        assert_eq!(self.shape(), other.shape());
        let channels = self.channels.iter().zip(other.channels.iter()).map(|(a,b)| a - b).collect::<Vec<DMatrix<Float>>>();
        Frame::from_channels(channels, ImageEncoding::F64)
    }
}
