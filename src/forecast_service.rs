//! Forecast fetching off the input loop.
//! Replies come back over a channel and are applied by the loop itself.

use hourcast_weather::{ForecastReply, ForecastWindower, PendingForecast};
use tokio::sync::mpsc::UnboundedSender;

/// Spawn the forecast request for `pending`; the reply is sent on `tx`.
pub fn request_forecast(
    tx: &UnboundedSender<ForecastReply>,
    windower: ForecastWindower,
    pending: PendingForecast,
) {
    let tx = tx.clone();
    tokio::spawn(async move {
        let reply = pending.fetch(&windower).await;
        if tx.send(reply).is_err() {
            tracing::debug!("Forecast reply dropped, input loop has exited");
        }
    });
}
