pub mod achievement;
pub mod auth;
pub mod challenge;
pub mod fasting;
pub mod group;
pub mod health;
pub mod prayer;
pub mod quote;
pub mod quran_reading;
pub mod stats;
pub mod sync;

use axum::Router;

use crate::state::AppState;

/// Build the `/api` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/register                      register (public)
/// /auth/login                         login (public)
/// /auth/logout                        logout (public, clears the cookie)
/// /auth/me                            get, update current user
///
/// /prayers                            list, create
/// /prayers/streak                     prayer streak
/// /prayers/daily                      five-prayer completion for a day
/// /prayers/{id}                       get, update, delete
///
/// /fastings                           list, create
/// /fastings/streak                    fasting streak
/// /fastings/{id}                      get, update, delete
///
/// /quran-readings                     list, create
/// /quran-readings/streak              reading streak
/// /quran-readings/{id}                get, update, delete
///
/// /achievements                       earned achievements
/// /achievements/catalog               every achievement definition
/// /achievements/evaluate              award newly earned (POST)
///
/// /groups                             list visible, create
/// /groups/{id}                        get, update, delete (owner)
/// /groups/{id}/members                list members
/// /groups/{id}/join                   join (POST)
/// /groups/{id}/leave                  leave (POST)
/// /groups/{id}/challenges             list, create (members)
///
/// /challenges/{id}                    get, update, delete
/// /challenges/{id}/progress           per-member progress
///
/// /sync                               list, queue
/// /sync/{id}                          transition (PUT), delete
///
/// /quotes                             list (public), create (admin)
/// /quotes/daily                       quote of the day (public)
/// /quotes/{id}                        get (public), delete (admin)
///
/// /stats/summary                      dashboard summary
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Registration, login and the current user.
        .nest("/auth", auth::router())
        // Activity tracking.
        .nest("/prayers", prayer::router())
        .nest("/fastings", fasting::router())
        .nest("/quran-readings", quran_reading::router())
        .nest("/achievements", achievement::router())
        // Community groups and their challenges.
        .nest("/groups", group::router())
        .nest("/challenges", challenge::router())
        // Offline mutation queue.
        .nest("/sync", sync::router())
        .nest("/quotes", quote::router())
        .nest("/stats", stats::router())
}
