extern crate nalgebra as na;

use std::path::Path;
use std::fs::File;
use std::io::{BufReader,BufWriter,Read,Write};
use color_eyre::eyre::{bail, ensure, eyre, Result, WrapErr};
use na::DMatrix;

use crate::Float;
use crate::image::{Frame,image_encoding::ImageEncoding};

pub const FLOW_MAGIC: &[u8; 4] = b"PIEH";
pub const FLOW_EXTENSION: &str = "flo";
pub const FLOW_HEADER_LEN: u64 = 12;

/**
 * Reads a Middlebury style .flo file into a (height, width, 2) frame.
 * Channel 0 is the horizontal and channel 1 the vertical flow component.
 */
pub fn read_flow(file_path: &Path) -> Result<Frame> {
    let file = File::open(file_path).wrap_err_with(|| format!("could not open flow file: {}", file_path.display()))?;
    let file_len = file.metadata().wrap_err_with(|| format!("could not stat flow file: {}", file_path.display()))?.len();
    let mut reader = BufReader::new(file);

    let mut magic = [0u8; 4];
    reader.read_exact(&mut magic).wrap_err_with(|| format!("flow file too short for header: {}", file_path.display()))?;
    if &magic != FLOW_MAGIC {
        bail!("Flow file header does not contain PIEH: {} (found {:?})", file_path.display(), String::from_utf8_lossy(&magic));
    }

    let width = read_i32(&mut reader).wrap_err_with(|| format!("flow file missing width: {}", file_path.display()))?;
    let height = read_i32(&mut reader).wrap_err_with(|| format!("flow file missing height: {}", file_path.display()))?;
    ensure!(width > 0 && height > 0, "flow file has invalid dimensions {}x{}: {}", width, height, file_path.display());
    let (width, height) = (width as usize, height as usize);

    let payload_len = width.checked_mul(height).and_then(|n| n.checked_mul(2*4))
        .ok_or_else(|| eyre!("flow file dimensions {}x{} overflow: {}", width, height, file_path.display()))?;
    ensure!((payload_len as u64) <= file_len.saturating_sub(FLOW_HEADER_LEN), "flow file payload shorter than {}x{}x2: {}", height, width, file_path.display());

    let mut payload = vec![0u8; payload_len];
    reader.read_exact(&mut payload).wrap_err_with(|| format!("flow file payload shorter than {}x{}x2: {}", height, width, file_path.display()))?;

    let mut u = DMatrix::<Float>::zeros(height,width);
    let mut v = DMatrix::<Float>::zeros(height,width);
    for (idx, value) in payload.chunks_exact(4).map(|b| f32::from_le_bytes([b[0],b[1],b[2],b[3]])).enumerate() {
        let pixel = idx/2;
        let (r, c) = (pixel/width, pixel%width);
        match idx % 2 {
            0 => u[(r,c)] = value as Float,
            _ => v[(r,c)] = value as Float
        }
    }

    Ok(Frame::from_channels(vec![u,v], ImageEncoding::F32))
}

pub fn write_flow(file_path: &Path, flow: &Frame) -> Result<()> {
    ensure!(flow.channel_count() == 2, "a flow field needs exactly 2 channels, got {}", flow.channel_count());
    let file = File::create(file_path).wrap_err_with(|| format!("could not create flow file: {}", file_path.display()))?;
    let mut writer = BufWriter::new(file);

    writer.write_all(FLOW_MAGIC)?;
    writer.write_all(&(flow.width() as i32).to_le_bytes())?;
    writer.write_all(&(flow.height() as i32).to_le_bytes())?;
    for r in 0..flow.height() {
        for c in 0..flow.width() {
            writer.write_all(&(flow.get(r,c,0) as f32).to_le_bytes())?;
            writer.write_all(&(flow.get(r,c,1) as f32).to_le_bytes())?;
        }
    }
    writer.flush()?;
    Ok(())
}

pub fn flow_file_name(frame_no: usize) -> String {
    format!("{}.{}", frame_no, FLOW_EXTENSION)
}

fn read_i32<R: Read>(reader: &mut R) -> std::io::Result<i32> {
    let mut bytes = [0u8; 4];
    reader.read_exact(&mut bytes)?;
    Ok(i32::from_le_bytes(bytes))
}
