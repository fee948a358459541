//! Model to diagram file serialization.

use super::OudWriter;
use crate::domain::{Direction, LineStations, TimetableEntry, TrainEntry};
use crate::model::{RailwayModel, TrainType};

const FILE_TYPE: &str = "OuDiaSecond.1.10";
const APP_COMMENT: &str = "OuDiaSecond Ver. 2.06.03";

/// Default start of the diagram day, 04:00.
const KITEN_JIKOKU: &str = "400";

const TRACK_NAME: &str = "着発線0";

/// Per-station properties. Every station gets the same single-track setup.
const EKI_PROPS: [(&str, &str); 12] = [
    ("JikokuhyouTrackDisplayKudari", "0"),
    ("JikokuhyouTrackDisplayNobori", "0"),
    ("DiagramTrackDisplay", "0"),
    ("NextEkiDistance", "0"),
    ("JikokuhyouTrackOmit", "0"),
    ("JikokuhyouJikokuDisplayKudari", "0,1"),
    ("JikokuhyouJikokuDisplayNobori", "0,1"),
    ("JikokuhyouSyubetsuChangeDisplayKudari", "0,0,0,0,0"),
    ("JikokuhyouSyubetsuChangeDisplayNobori", "0,0,0,0,0"),
    ("DiagramColorNextEki", "0"),
    ("JikokuhyouOuterDisplayKudari", "0,0"),
    ("JikokuhyouOuterDisplayNobori", "0,0"),
];

const SYUBETSU_PROPS: [(&str, &str); 6] = [
    ("JikokuhyouMojiColor", "00000000"),
    ("JikokuhyouFontIndex", "0"),
    ("JikokuhyouBackColor", "00FFFFFF"),
    ("DiagramSenColor", "00000000"),
    ("DiagramSenStyle", "SenStyle_Jissen"),
    ("StopMarkDrawType", "EStopMarkDrawType_DrawOnStop"),
];

const FONT: &str = "PointTextHeight=9;Facename=ＭＳ ゴシック";

const DISP_PROP: [(&str, &str); 44] = [
    ("JikokuhyouFont", FONT),
    ("JikokuhyouFont", "PointTextHeight=9;Facename=ＭＳ ゴシック;Bold=1"),
    ("JikokuhyouFont", "PointTextHeight=9;Facename=ＭＳ ゴシック;Itaric=1"),
    ("JikokuhyouFont", "PointTextHeight=9;Facename=ＭＳ ゴシック;Bold=1;Itaric=1"),
    ("JikokuhyouFont", FONT),
    ("JikokuhyouFont", FONT),
    ("JikokuhyouFont", FONT),
    ("JikokuhyouFont", FONT),
    ("JikokuhyouVFont", "PointTextHeight=9;Facename=@ＭＳ ゴシック"),
    ("DiaEkimeiFont", FONT),
    ("DiaJikokuFont", "PointTextHeight=7;Facename=ＭＳ ゴシック"),
    ("DiaRessyaFont", FONT),
    ("OperationTableFont", FONT),
    ("AllOperationTableJikokuFont", FONT),
    ("CommentFont", FONT),
    ("DiaMojiColor", "00000000"),
    ("DiaBackColor", "00FFFFFF"),
    ("DiaBackColor", "00FFFFFF"),
    ("DiaBackColor", "00FFFFFF"),
    ("DiaBackColor", "00FFFFFF"),
    ("DiaRessyaColor", "00000000"),
    ("DiaJikuColor", "00C0C0C0"),
    ("JikokuhyouBackColor", "00FFFFFF"),
    ("JikokuhyouBackColor", "00F0F0F0"),
    ("JikokuhyouBackColor", "00FFFFFF"),
    ("JikokuhyouBackColor", "00FFFFFF"),
    ("StdOpeTimeLowerColor", "00E0E0FF"),
    ("StdOpeTimeHigherColor", "00FFFFE0"),
    ("StdOpeTimeUndefColor", "0080FFFF"),
    ("StdOpeTimeIllegalColor", "00A0A0A0"),
    ("OperationStringColor", "00000000"),
    ("OperationGridColor", "00000000"),
    ("EkimeiLength", "6"),
    ("JikokuhyouRessyaWidth", "5"),
    ("AnySecondIncDec1", "5"),
    ("AnySecondIncDec2", "15"),
    ("DisplayRessyamei", "1"),
    ("DisplayOuterTerminalEkimeiOriginSide", "0"),
    ("DisplayOuterTerminalEkimeiTerminalSide", "0"),
    ("DiagramDisplayOuterTerminal", "0"),
    ("SecondRound", "0"),
    ("Display2400", "0"),
    ("OperationNumberRows", "1"),
    ("DisplayInOutLinkCode", "0"),
];

/// Serialize a model to an OuDiaSecond diagram file.
///
/// Output depends only on the model, so serializing the same model twice
/// yields identical text.
pub fn serialize(model: &RailwayModel) -> String {
    let mut w = OudWriter::new();
    w.entry("FileType", FILE_TYPE);

    w.open("Rosen")
        .entry("Rosenmei", &model.railway_data.name)
        .entry("KitenJikoku", KITEN_JIKOKU)
        .entry("DiagramDgrYZahyouKyoriDefault", 60)
        .entry("OperationCrossKitenJikoku", 0)
        .entry("Comment", "");

    for name in model.line.names() {
        write_station(&mut w, name);
    }
    for train_type in model.types.iter() {
        write_type(&mut w, train_type);
    }
    for revision in model.trains.keys() {
        write_dia(&mut w, model, revision);
    }
    w.close();

    w.open("DispProp");
    for (key, value) in DISP_PROP {
        w.entry(key, value);
    }
    w.close();
    w.entry("FileTypeAppComment", APP_COMMENT);

    w.finish()
}

fn write_station(w: &mut OudWriter, name: &str) {
    w.open("Eki")
        .entry("Ekimei", name)
        .entry("Ekijikokukeisiki", "Jikokukeisiki_Hatsuchaku")
        .entry("Ekikibo", "Ekikibo_Ippan")
        .entry("DownMain", 0)
        .entry("UpMain", 0);
    w.open("EkiTrack2Cont")
        .open("EkiTrack2")
        .entry("TrackName", TRACK_NAME)
        .entry("TrackRyakusyou", "")
        .close()
        .close();
    for (key, value) in EKI_PROPS {
        w.entry(key, value);
    }
    w.close();
}

fn write_type(w: &mut OudWriter, train_type: &TrainType) {
    w.open("Ressyasyubetsu")
        .entry("Syubetsumei", &train_type.short)
        .entry("Ryakusyou", &train_type.short);
    for (key, value) in SYUBETSU_PROPS {
        w.entry(key, value);
    }
    w.close();
}

fn write_dia(w: &mut OudWriter, model: &RailwayModel, revision: &str) {
    w.open("Dia")
        .entry("DiaName", revision)
        .entry("MainBackColorIndex", 0)
        .entry("SubBackColorIndex", 0)
        .entry("BackPatternIndex", 0);
    for direction in [Direction::Down, Direction::Up] {
        let trains = model.bucket(revision, direction);
        if trains.is_empty() {
            continue;
        }
        w.open(direction.oudia_name());
        for train in trains {
            write_train(w, model, train, direction);
        }
        w.close();
    }
    w.close();
}

fn write_train(w: &mut OudWriter, model: &RailwayModel, train: &TrainEntry, direction: Direction) {
    let syubetsu = model.types.index_of(&train.train_type).unwrap_or(0);
    w.open("Ressya")
        .entry("Houkou", direction.oudia_name())
        .entry("Syubetsu", syubetsu)
        .entry("Ressyabangou", &train.number)
        .entry("EkiJikoku", eki_jikoku(&model.line, train, direction).join(","))
        .close();
}

/// Build the per-station cells of one train row.
///
/// There is one cell per line station, in the row order of `direction`:
/// head to tail for down trains, tail to head for up trains. Walking that
/// order, stations before the train reaches the line are `0`, stations
/// after it leaves the line are empty, and stations in between are a stop
/// cell or `2$0` when the train passes without stopping.
pub fn eki_jikoku(line: &LineStations, train: &TrainEntry, direction: Direction) -> Vec<String> {
    let mut cells = vec![String::new(); line.len()];
    let Some(span) = line.span(&train.timetable) else {
        return cells;
    };

    let order: Vec<usize> = match direction {
        Direction::Down => (0..line.len()).collect(),
        Direction::Up => (0..line.len()).rev().collect(),
    };
    for (column, index) in order.into_iter().enumerate() {
        let (before, after) = match direction {
            Direction::Down => (index < span.first, index > span.last),
            Direction::Up => (index > span.first, index < span.last),
        };
        if after {
            break;
        }
        cells[column] = if before {
            "0".to_string()
        } else {
            let name = &line.names()[index];
            match train.timetable.iter().find(|e| &e.name == name) {
                Some(entry) => stop_cell(entry),
                None => "2$0".to_string(),
            }
        };
    }
    cells
}

/// Cell for a stop: `1;<arr>/<dep>$0`, `1;<arr>/$0`, `1;<dep>$0`, or
/// `1$0` when the stop has no usable time.
pub fn stop_cell(entry: &TimetableEntry) -> String {
    match (&entry.arr, &entry.dep) {
        (Some(arr), Some(dep)) => format!("1;{}/{}$0", arr.to_oudia(), dep.to_oudia()),
        (Some(arr), None) => format!("1;{}/$0", arr.to_oudia()),
        (None, Some(dep)) => format!("1;{}$0", dep.to_oudia()),
        (None, None) => "1$0".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collect::CollectedLine;
    use crate::domain::{StationRef, StopEntry, StopTimes, TrainDetail, TrainRecord};
    use crate::model::build_model;
    use crate::oudia::BOM;

    fn line(names: &[&str]) -> LineStations {
        LineStations::new(names.iter().map(|s| s.to_string()).collect())
    }

    fn train(stops: &[(&str, &[&str])]) -> TrainEntry {
        let timetable: Vec<TimetableEntry> = stops
            .iter()
            .map(|(name, times)| {
                TimetableEntry::new(name, None, StopTimes::resolve(*times), "1", "K", "X")
            })
            .collect();
        TrainEntry {
            url: String::new(),
            number: "1".into(),
            origin: stops.first().map(|s| s.0.to_string()).unwrap_or_default(),
            destination: "X".into(),
            via: None,
            train_type: "K".into(),
            name: vec![String::new()],
            distance: 0,
            direction: None,
            fare_type: None,
            note: Vec::new(),
            timetable,
        }
    }

    fn collected(stations: &[&str], trains: Vec<(&str, &str, Option<u8>, Vec<StopEntry>)>) -> CollectedLine {
        CollectedLine {
            line_url: "https://ekitan.com/line/9".into(),
            line_id: "9".into(),
            label: "テスト線".into(),
            stations: stations
                .iter()
                .map(|s| StationRef::new(*s, format!("https://ekitan.com/st/{s}")))
                .collect(),
            revision: Some("2024年3月16日".into()),
            trains: trains
                .into_iter()
                .map(|(id, train_type, direction_id, stops)| TrainDetail {
                    record: TrainRecord {
                        url: format!("https://ekitan.com/train?tx=0-0-{id}-1-2&departure="),
                        train_id: id.into(),
                        train_id2: "1-2".into(),
                        dest: "B".into(),
                        train_type: train_type.into(),
                        direction: String::new(),
                        direction_id,
                    },
                    stops,
                })
                .collect(),
        }
    }

    fn lines(text: &str) -> Vec<&str> {
        text.trim_start_matches(BOM).split("\r\n").collect()
    }

    #[test]
    fn stop_cells() {
        let t = train(&[("A", &["10:00"]), ("B", &["10:05着"]), ("C", &["09:30", "09:32"]), ("D", &[])]);
        assert_eq!(stop_cell(&t.timetable[0]), "1;1000$0");
        assert_eq!(stop_cell(&t.timetable[1]), "1;1005/$0");
        assert_eq!(stop_cell(&t.timetable[2]), "1;930/932$0");
        assert_eq!(stop_cell(&t.timetable[3]), "1$0");
    }

    #[test]
    fn down_row_skips_before_and_omits_after() {
        let l = line(&["S0", "S1", "S2", "S3"]);
        let t = train(&[("X", &["07:00"]), ("S1", &["08:00"]), ("S2", &["08:05", "08:06"])]);
        let cells = eki_jikoku(&l, &t, Direction::Down);
        assert_eq!(cells, ["0", "1;800$0", "1;805/806$0", ""]);
    }

    #[test]
    fn down_row_marks_passed_stations() {
        let l = line(&["S0", "S1", "S2", "S3"]);
        let t = train(&[("S0", &["08:00"]), ("S3", &["08:20着"])]);
        let cells = eki_jikoku(&l, &t, Direction::Down);
        assert_eq!(cells, ["1;800$0", "2$0", "2$0", "1;820/$0"]);
    }

    #[test]
    fn up_row_walks_tail_to_head() {
        let l = line(&["S0", "S1", "S2", "S3"]);
        let t = train(&[("S2", &["09:00"]), ("S0", &["09:10着"])]);
        let cells = eki_jikoku(&l, &t, Direction::Up);
        // columns: S3, S2, S1, S0
        assert_eq!(cells, ["0", "1;900$0", "2$0", "1;910/$0"]);

        let t = train(&[("S3", &["09:00"]), ("S1", &["09:10着"])]);
        let cells = eki_jikoku(&l, &t, Direction::Up);
        assert_eq!(cells, ["1;900$0", "2$0", "1;910/$0", ""]);
    }

    #[test]
    fn single_station_rows() {
        let l = line(&["S0", "S1", "S2"]);
        let t = train(&[("S1", &["12:00"])]);
        assert_eq!(eki_jikoku(&l, &t, Direction::Down), ["0", "1;1200$0", ""]);
        assert_eq!(eki_jikoku(&l, &t, Direction::Up), ["0", "1;1200$0", ""]);
    }

    #[test]
    fn off_line_train_gets_empty_row() {
        let l = line(&["S0", "S1"]);
        assert_eq!(eki_jikoku(&l, &train(&[("Q", &["12:00"])]), Direction::Down), ["", ""]);
        assert_eq!(eki_jikoku(&l, &train(&[]), Direction::Up), ["", ""]);
    }

    #[test]
    fn end_to_end_two_station_line() {
        let model = build_model(&collected(
            &["A", "B"],
            vec![(
                "12",
                "K",
                Some(0),
                vec![StopEntry::new("A", &["10:00"]), StopEntry::new("B", &["10:05着"])],
            )],
        ));
        let text = serialize(&model);
        assert!(text.starts_with('\u{feff}'));

        let lines = lines(&text);
        let kudari = lines.iter().position(|l| *l == "Kudari.").unwrap();
        assert_eq!(
            &lines[kudari..kudari + 7],
            [
                "Kudari.",
                "Ressya.",
                "Houkou=Kudari",
                "Syubetsu=0",
                "Ressyabangou=12",
                "EkiJikoku=1;1000$0,1;1005/$0",
                ".",
            ]
        );
        assert!(!lines.contains(&"Nobori."));
    }

    #[test]
    fn train_without_stops_gets_empty_row_in_its_labelled_direction() {
        let model = build_model(&collected(
            &["S0", "S1", "S2", "S3"],
            vec![
                (
                    "1",
                    "K",
                    Some(1),
                    vec![StopEntry::new("S1", &["08:00"]), StopEntry::new("S2", &["08:05", "08:06"])],
                ),
                ("2", "K", Some(0), vec![StopEntry::new("S3", &["09:00"]), StopEntry::new("S0", &["09:20"])]),
                ("3", "K", Some(1), vec![]),
            ],
        ));
        let text = serialize(&model);
        let lines = lines(&text);

        let numbers: Vec<&str> = lines.iter().filter(|l| l.starts_with("Ressyabangou=")).copied().collect();
        assert_eq!(numbers, ["Ressyabangou=1", "Ressyabangou=3", "Ressyabangou=2"]);

        let rows: Vec<&str> = lines.iter().filter(|l| l.starts_with("EkiJikoku=")).copied().collect();
        assert_eq!(
            rows,
            [
                "EkiJikoku=0,1;800$0,1;805/806$0,",
                "EkiJikoku=,,,",
                "EkiJikoku=1;900$0,2$0,2$0,1;920$0",
            ]
        );
    }

    #[test]
    fn block_order_and_structure() {
        let model = build_model(&collected(
            &["A駅", "B駅", "C駅"],
            vec![
                ("1", "普通", Some(1), vec![StopEntry::new("A", &["10:00"]), StopEntry::new("C", &["10:10着"])]),
                ("2", "快速", Some(0), vec![StopEntry::new("C", &["11:00"]), StopEntry::new("B", &["11:05着"])]),
                ("3", "普通", None, vec![StopEntry::new("Z", &["12:00"])]),
            ],
        ));
        let text = serialize(&model);
        let lines = lines(&text);

        assert_eq!(lines[0], "FileType=OuDiaSecond.1.10");
        assert_eq!(lines[1], "Rosen.");
        assert_eq!(lines[2], "Rosenmei=テスト線");
        assert_eq!(lines[3], "KitenJikoku=400");
        assert_eq!(*lines.last().unwrap(), "FileTypeAppComment=OuDiaSecond Ver. 2.06.03");

        let ekimei: Vec<&str> = lines.iter().filter(|l| l.starts_with("Ekimei=")).copied().collect();
        assert_eq!(ekimei, ["Ekimei=A", "Ekimei=B", "Ekimei=C"]);
        assert_eq!(lines.iter().filter(|l| **l == "TrackName=着発線0").count(), 3);

        let types: Vec<&str> = lines.iter().filter(|l| l.starts_with("Syubetsumei=")).copied().collect();
        assert_eq!(types, ["Syubetsumei=普通", "Syubetsumei=快速"]);

        let pos = |needle: &str| lines.iter().position(|l| *l == needle).unwrap();
        assert!(pos("Eki.") < pos("Ressyasyubetsu."));
        assert!(pos("Ressyasyubetsu.") < pos("Dia."));
        assert!(pos("DiaName=2024年3月16日") < pos("Kudari."));
        assert!(pos("Kudari.") < pos("Nobori."));
        assert!(pos("Nobori.") < pos("DispProp."));

        let rows: Vec<&str> = lines.iter().filter(|l| l.starts_with("EkiJikoku=")).copied().collect();
        assert_eq!(rows, ["EkiJikoku=1;1000$0,2$0,1;1010/$0", "EkiJikoku=1;1100$0,1;1105/$0,"]);
        assert!(lines.contains(&"Syubetsu=1"));

        let opens = lines.iter().filter(|l| l.len() > 1 && l.ends_with('.') && !l.contains('=')).count();
        let closes = lines.iter().filter(|l| **l == ".").count();
        assert_eq!(opens, closes);
    }

    #[test]
    fn empty_buckets_omit_direction_blocks() {
        let model = build_model(&collected(&["A", "B"], Vec::new()));
        let text = serialize(&model);
        let lines = lines(&text);
        assert!(lines.contains(&"Dia."));
        assert!(!lines.contains(&"Kudari."));
        assert!(!lines.contains(&"Nobori."));
        assert!(!lines.iter().any(|l| l.starts_with("Ressyasyubetsu")));
    }

    #[test]
    fn serialization_is_deterministic() {
        let build = || {
            build_model(&collected(
                &["A", "B", "C"],
                vec![
                    ("1", "普通", Some(1), vec![StopEntry::new("A", &["10:00"]), StopEntry::new("B", &["10:05着"])]),
                    ("2", "快速", Some(0), vec![StopEntry::new("C", &["11:00"]), StopEntry::new("A", &["11:09着"])]),
                ],
            ))
        };
        let model = build();
        assert_eq!(serialize(&model), serialize(&model));
        assert_eq!(serialize(&model), serialize(&build()));
    }
}
