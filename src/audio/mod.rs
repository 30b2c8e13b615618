//! Audio buffer and WAV container I/O

mod buffer;
pub mod wav;

pub use buffer::{AudioBuffer, WavFormat, FORMAT_PCM};
pub use wav::{
    dump_to_writer, dump_to_writer_with_config, dump_wav, dump_wav_with_config, load_from_reader,
    load_from_reader_with_config, load_wav, load_wav_with_config,
};
