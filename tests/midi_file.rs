use mtrk::prelude::*;
use pretty_assertions::assert_eq;

fn chunk(tag: &[u8; 4], payload: &[u8]) -> Vec<u8> {
    let mut out = Vec::new();
    RawChunk::new(*tag, payload).write(&mut out).unwrap();
    out
}

fn header(format: u16, tracks: u16, division: [u8; 2]) -> Vec<u8> {
    let [f0, f1] = format.to_be_bytes();
    let [t0, t1] = tracks.to_be_bytes();
    chunk(b"MThd", &[f0, f1, t0, t1, division[0], division[1]])
}

const CONDUCTOR: &[u8] = &[
    0x00, 0xFF, 0x51, 0x03, 0x07, 0xA1, 0x20, //
    0x00, 0xFF, 0x2F, 0x00,
];

const MELODY: &[u8] = &[
    0x00, 0x91, 0x3C, 0x64, 0x60, 0x3E, 0x64, // running status
    0x60, 0x81, 0x3C, 0x40, 0x00, 0x3E, 0x40, //
    0x00, 0xFF, 0x2F, 0x00,
];

fn simultaneous_file() -> Vec<u8> {
    let mut bytes = header(1, 2, [0x00, 0x60]);
    bytes.extend(chunk(b"MTrk", CONDUCTOR));
    bytes.extend(chunk(b"MTrk", MELODY));
    bytes
}

#[test]
fn parse_format_one() {
    let bytes = simultaneous_file();
    let file = MidiFile::parse(&bytes).unwrap();

    assert_eq!(file.format_type(), FormatType::Simultaneous);
    assert_eq!(file.header().num_tracks(), 2);
    assert_eq!(file.timing(), Timing::new_ticks_per_quarter_note(96));

    let tracks: Vec<&Track> = file.tracks().collect();
    assert_eq!(tracks.len(), 2);
    assert_eq!(tracks[0].events().len(), 2);
    assert_eq!(tracks[1].events().len(), 5);

    let TrackMessage::ChannelVoice(second_note) = tracks[1].events()[1].message() else {
        panic!("expected a note");
    };
    assert_eq!(second_note.channel(), Channel::Two);
    assert_eq!(second_note.status(), 0x91);
}

#[test]
fn write_with_and_without_running_status() {
    let bytes = simultaneous_file();
    let file = MidiFile::parse(&bytes).unwrap();

    let compressed = file
        .to_bytes(WriterConfig::default().with_running_status(true))
        .unwrap();
    assert_eq!(compressed, bytes);

    let expanded = file.to_bytes(WriterConfig::default()).unwrap();
    assert_eq!(expanded.len(), bytes.len() + 2);

    let reparsed = MidiFile::parse(&expanded).unwrap();
    assert_eq!(reparsed, file);
}

#[test]
fn owned_file_outlives_its_buffer() {
    let file = {
        let bytes = simultaneous_file();
        MidiFile::parse(&bytes).unwrap().into_owned()
    };
    assert_eq!(file.tracks().count(), 2);
    assert_eq!(
        file.to_bytes(WriterConfig::default().with_running_status(true))
            .unwrap(),
        simultaneous_file()
    );
}

#[test]
fn smpte_division() {
    let mut bytes = header(0, 1, [0xE2, 0x50]);
    bytes.extend(chunk(b"MTrk", CONDUCTOR));
    let file = MidiFile::parse(&bytes).unwrap();

    let Timing::Smpte(smpte) = file.timing() else {
        panic!("expected SMPTE timing");
    };
    assert_eq!(smpte.fps(), SmpteFps::Thirty);
    assert_eq!(smpte.ticks_per_frame(), 80);
    assert_eq!(file.timing().ticks_per_quarter_note(), None);
}

#[test]
fn header_may_follow_tracks() {
    let mut bytes = chunk(b"MTrk", CONDUCTOR);
    bytes.extend(header(0, 1, [0x01, 0xE0]));
    let file = MidiFile::parse(&bytes).unwrap();
    assert_eq!(file.tracks().count(), 1);

    // written back with the header first
    let mut expected = header(0, 1, [0x01, 0xE0]);
    expected.extend(chunk(b"MTrk", CONDUCTOR));
    assert_eq!(file.to_bytes(WriterConfig::default()).unwrap(), expected);
}

#[test]
fn unknown_chunks_are_preserved() {
    let mut bytes = header(1, 1, [0x00, 0x60]);
    bytes.extend(chunk(b"XFIH", &[0x01, 0x02, 0x03]));
    bytes.extend(chunk(b"MTrk", CONDUCTOR));
    let file = MidiFile::parse(&bytes).unwrap();

    let unknown: Vec<&RawChunk> = file.unknown_chunks().collect();
    assert_eq!(unknown.len(), 1);
    assert_eq!(unknown[0].tag(), *b"XFIH");
    assert_eq!(unknown[0].payload(), [0x01, 0x02, 0x03]);
    assert_eq!(file.to_bytes(WriterConfig::default()).unwrap(), bytes);
}

#[test]
fn track_count_is_rewritten() {
    // the header claims 3 tracks, but only one follows
    let mut bytes = header(1, 3, [0x00, 0x60]);
    bytes.extend(chunk(b"MTrk", CONDUCTOR));
    let file = MidiFile::parse(&bytes).unwrap();
    assert_eq!(file.header().num_tracks(), 3);

    let written = file.to_bytes(WriterConfig::default()).unwrap();
    assert_eq!(&written[10..12], [0x00, 0x01]);
}

#[test]
fn file_errors() {
    let err = MidiFile::parse(&chunk(b"MTrk", CONDUCTOR)).unwrap_err();
    assert_eq!(*err.cause(), ParseError::File(FileError::NoHeader));

    let mut two_headers = header(0, 1, [0x00, 0x60]);
    two_headers.extend(header(0, 1, [0x00, 0x60]));
    let err = MidiFile::parse(&two_headers).unwrap_err();
    assert_eq!(err.position(), 14);
    assert_eq!(*err.cause(), ParseError::Chunk(ChunkError::DuplicateHeader));

    let short_header = chunk(b"MThd", &[0x00, 0x00, 0x00, 0x01]);
    let err = MidiFile::parse(&short_header).unwrap_err();
    assert_eq!(*err.cause(), ParseError::Chunk(ChunkError::InvalidHeaderLength(4)));

    let bad_format = header(7, 1, [0x00, 0x60]);
    let err = MidiFile::parse(&bad_format).unwrap_err();
    assert_eq!(*err.cause(), ParseError::Header(HeaderError::InvalidFormat(7)));

    let mut format_zero = header(0, 2, [0x00, 0x60]);
    format_zero.extend(chunk(b"MTrk", CONDUCTOR));
    format_zero.extend(chunk(b"MTrk", CONDUCTOR));
    let err = MidiFile::parse(&format_zero).unwrap_err();
    assert_eq!(
        *err.cause(),
        ParseError::Chunk(ChunkError::MultipleTracksForSingleMultiChannel)
    );
}

#[test]
fn track_errors_are_offset_into_the_file() {
    let mut bytes = header(0, 1, [0x00, 0x60]);
    // second event has a truncated note off
    bytes.extend(chunk(b"MTrk", &[0x00, 0xFF, 0x2F, 0x00, 0x00, 0x80, 0x3C]));
    let err = MidiFile::parse(&bytes).unwrap_err();

    // 14 header bytes, 8 chunk prefix bytes, then 6 bytes into the payload
    assert_eq!(err.position(), 28);
    assert_eq!(
        *err.cause(),
        ParseError::TruncatedChannelEvent {
            expected: 2,
            available: 1
        }
    );
}

#[test]
fn build_a_file() {
    let events = vec![
        TrackEvent::new(0, MetaMessage::new(MetaType::TrackName, b"built".as_slice())),
        TrackEvent::new(0, MetaMessage::end_of_track()),
    ];
    let mut builder = MidiFileBuilder::default();
    builder
        .header(Header::new(
            FormatType::SingleMultiChannel,
            1,
            Timing::new_ticks_per_quarter_note(480),
        ))
        .track(Track::new(events.clone()));
    let file = builder.build().unwrap();

    let bytes = file.to_bytes(WriterConfig::default()).unwrap();
    let parsed = MidiFile::parse(&bytes).unwrap();
    let track = parsed.tracks().next().unwrap();
    assert_eq!(track.events(), events);
}
