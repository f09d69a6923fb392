pub mod speech;
pub mod transcription;
pub mod upload;

pub use speech::{SPEECH_FORMATS, SPEECH_MODELS, SPEECH_VOICES, SpeechAudio, SpeechRequest};
pub use transcription::{
    AudioTask, Granularity, Segment, SegmentTranscription, Transcription, TranscriptionOptions,
    TranscriptionRequest, TranscriptionResult, TranslationRequest, Word, WordTranscription,
};
pub use upload::{
    ACCEPTED_AUDIO_EXTENSIONS, AudioReader, FileInput, InMemoryUpload, UploadHandle,
};
