//! Building the railway model from collected pages.

use indexmap::IndexMap;
use tracing::{debug, info, warn};

use super::{RailwayData, RailwayModel, StationTime, TrainUrl, TypeRegistry};
use crate::collect::CollectedLine;
use crate::domain::{
    LineStations, StationRef, StopTimes, TimetableEntry, TrainDetail, TrainEntry, clean_time,
};

/// Build the normalized model for a collected line.
///
/// Each train gets a timetable in detail-page order and a direction
/// relative to the line's station order. All trains land in the single
/// revision bucket named by the collected revision date.
pub fn build_model(line: &CollectedLine) -> RailwayModel {
    let stations: Vec<StationRef> = line.stations.iter().map(StationRef::stripped).collect();
    let line_stations = LineStations::from_stations(&stations);

    let mut model = RailwayModel {
        railway_data: RailwayData::new(line.revision.clone(), &line.line_id, &line.label),
        stations,
        train_url_list: IndexMap::new(),
        station_time_list: IndexMap::new(),
        types: TypeRegistry::new(),
        trains: IndexMap::new(),
        line: line_stations,
    };

    let mut trains: IndexMap<String, TrainEntry> = IndexMap::new();
    for train in &line.trains {
        let entry = build_train(&mut model, train);
        if entry.direction.is_none() {
            debug!(number = %entry.number, "train has no direction on this line");
        }
        let key = entry.composite_key();
        if let Some(previous) = trains.insert(key.clone(), entry) {
            warn!(key = %key, replaced = %previous.url, "two trains share a key, keeping the latest");
        }
    }
    info!(
        line = %model.railway_data.name,
        trains = trains.len(),
        types = model.types.len(),
        "built model"
    );

    let revision = model.revision_key().to_string();
    model.trains.insert(revision, trains);
    model
}

/// Build one train's entry, registering its URL, stop times and type on
/// the model as a side effect.
fn build_train(model: &mut RailwayModel, train: &TrainDetail) -> TrainEntry {
    let record = &train.record;

    model
        .train_url_list
        .entry(record.train_id.clone())
        .or_default()
        .insert(
            record.train_id2.clone(),
            TrainUrl {
                url: record.url.clone(),
            },
        );

    let direction = record.stop_direction();
    let mut timetable = Vec::with_capacity(train.stops.len());
    for stop in &train.stops {
        let last = stop
            .times
            .last()
            .map(|t| clean_time(t).replace(':', ""))
            .unwrap_or_default();
        model.station_time_list.insert(
            format!("{last}-{}-{}", stop.station, record.train_id),
            StationTime {
                train_type: record.train_type.clone(),
                destination: record.dest.clone(),
                direction: record.direction_id,
            },
        );

        timetable.push(TimetableEntry::new(
            &stop.station,
            direction,
            StopTimes::resolve(&stop.times),
            &record.train_id,
            &record.train_type,
            &record.dest,
        ));
    }

    model.types.register(&record.train_type);

    let origin = train
        .stops
        .first()
        .map(|s| s.station.clone())
        .unwrap_or_default();

    TrainEntry {
        url: record.url.clone(),
        number: record.train_id.clone(),
        origin,
        destination: record.dest.clone(),
        via: None,
        train_type: record.train_type.clone(),
        name: vec![String::new()],
        distance: 0,
        direction: model.line.classify(&timetable, direction),
        fare_type: None,
        note: Vec::new(),
        timetable,
    }
}
