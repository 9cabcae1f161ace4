use common::guests::apply_stats;
use common::guests::lifetime_stats;
use common::records::GuestProfile;
use common::records::StayedLine;
use tracing::debug;

/// Fills the lifetime columns of each guest from the stored stays.
///
/// Stays of guests missing from `guests` are ignored, guests without stays
/// get zero bookings and empty dates.
pub fn recompute(mut guests: Vec<GuestProfile>, stayed: &[StayedLine]) -> Vec<GuestProfile> {
    let stats = lifetime_stats(stayed);
    let mut without_stays = 0;
    for guest in guests.iter_mut() {
        let s = stats.get(&guest.guest_id);
        if s.is_none() {
            without_stays += 1;
        }
        apply_stats(guest, s);
    }

    debug!(
        guests = guests.len(),
        without_stays,
        stayed_lines = stayed.len(),
        "guest lifetime stats recomputed"
    );

    guests
}
