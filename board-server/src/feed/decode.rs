//! GTFS-realtime decoding.

use gtfs_realtime::FeedMessage;
use prost::Message;

use crate::domain::RawStopUpdate;

use super::error::FeedError;

/// Decode raw protobuf bytes into a feed message.
pub fn decode_feed(bytes: &[u8]) -> Result<FeedMessage, FeedError> {
    Ok(FeedMessage::decode(bytes)?)
}

/// Flatten every trip update's stop-time rows, in feed order.
///
/// Each row inherits the route of its trip. Entities without a trip
/// update (vehicle positions, alerts) and trips without a route ID carry
/// nothing usable and are skipped. A row without a stop ID keeps an empty
/// one; the normalizer drops it.
pub fn stop_updates(feed: &FeedMessage) -> Vec<RawStopUpdate> {
    feed.entity
        .iter()
        .filter_map(|entity| entity.trip_update.as_ref())
        .filter_map(|trip_update| {
            let route_id = trip_update.trip.route_id.as_deref()?;
            Some((route_id, trip_update))
        })
        .flat_map(|(route_id, trip_update)| {
            trip_update
                .stop_time_update
                .iter()
                .map(move |stu| RawStopUpdate {
                    route_id: route_id.to_string(),
                    stop_id: stu.stop_id.clone().unwrap_or_default(),
                    departure_time: stu.departure.as_ref().and_then(|event| event.time),
                    arrival_time: stu.arrival.as_ref().and_then(|event| event.time),
                })
        })
        .collect()
}
