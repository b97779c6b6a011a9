//! Sample catalog data.
//!
//! Ten hotels, half of them in Delhi so a "Delhi" search exercises both
//! the three-hotel first page and the "show all" expansion. Each hotel
//! carries two rooms.

use crate::types::{Hotel, HotelId, LocationKey, Room, RoomId};

struct HotelSpec {
    id: &'static str,
    name: &'static str,
    location: &'static str,
    destination: &'static str,
    price: u32,
    rating: f32,
    description: &'static str,
    amenities: &'static [&'static str],
    rooms: &'static [RoomSpec],
}

struct RoomSpec {
    id: &'static str,
    room_type: &'static str,
    price: u32,
    capacity: u32,
}

const SAMPLE_HOTELS: &[HotelSpec] = &[
    HotelSpec {
        id: "del_leela",
        name: "The Leela Palace",
        location: "New Delhi, India",
        destination: "Delhi",
        price: 430,
        rating: 4.9,
        description: "Art-filled palace hotel overlooking the diplomatic enclave.",
        amenities: &["Spa", "Rooftop Pool", "Fine Dining"],
        rooms: &[
            RoomSpec {
                id: "room_leela_std",
                room_type: "Standard Room",
                price: 430,
                capacity: 2,
            },
            RoomSpec {
                id: "room_leela_ste",
                room_type: "Royal Suite",
                price: 890,
                capacity: 3,
            },
        ],
    },
    HotelSpec {
        id: "del_oberoi",
        name: "The Oberoi",
        location: "New Delhi, India",
        destination: "Delhi",
        price: 380,
        rating: 4.8,
        description: "Contemporary landmark beside the Delhi Golf Club.",
        amenities: &["Spa", "Pool", "Airport Transfer"],
        rooms: &[
            RoomSpec {
                id: "room_oberoi_std",
                room_type: "Premier Room",
                price: 380,
                capacity: 2,
            },
            RoomSpec {
                id: "room_oberoi_dlx",
                room_type: "Deluxe Suite",
                price: 640,
                capacity: 3,
            },
        ],
    },
    HotelSpec {
        id: "del_taj_palace",
        name: "Taj Palace",
        location: "New Delhi, India",
        destination: "Delhi",
        price: 320,
        rating: 4.7,
        description: "Six acres of gardens in the heart of the capital.",
        amenities: &["Gardens", "Pool", "Tennis Court"],
        rooms: &[
            RoomSpec {
                id: "room_taj_palace_std",
                room_type: "Superior Room",
                price: 320,
                capacity: 2,
            },
            RoomSpec {
                id: "room_taj_palace_dlx",
                room_type: "Luxury Suite",
                price: 560,
                capacity: 4,
            },
        ],
    },
    HotelSpec {
        id: "del_imperial",
        name: "The Imperial",
        location: "New Delhi, India",
        destination: "Delhi",
        price: 350,
        rating: 4.8,
        description: "Colonial-era grande dame on Janpath.",
        amenities: &["Heritage Tours", "Spa", "Fine Dining"],
        rooms: &[
            RoomSpec {
                id: "room_imperial_std",
                room_type: "Heritage Room",
                price: 350,
                capacity: 2,
            },
            RoomSpec {
                id: "room_imperial_ste",
                room_type: "Art Deco Suite",
                price: 720,
                capacity: 3,
            },
        ],
    },
    HotelSpec {
        id: "del_itc_maurya",
        name: "ITC Maurya",
        location: "New Delhi, India",
        destination: "Delhi",
        price: 290,
        rating: 4.6,
        description: "Home of the celebrated Bukhara restaurant.",
        amenities: &["Pool", "Gym", "Fine Dining"],
        rooms: &[
            RoomSpec {
                id: "room_itc_maurya_std",
                room_type: "Executive Room",
                price: 290,
                capacity: 2,
            },
            RoomSpec {
                id: "room_itc_maurya_dlx",
                room_type: "Towers Suite",
                price: 510,
                capacity: 3,
            },
        ],
    },
    HotelSpec {
        id: "mum_taj_mahal",
        name: "The Taj Mahal Palace",
        location: "Mumbai, India",
        destination: "Mumbai",
        price: 410,
        rating: 4.9,
        description: "Iconic seafront palace beside the Gateway of India.",
        amenities: &["Sea View", "Pool", "Spa"],
        rooms: &[
            RoomSpec {
                id: "room_mum_taj_mahal_std",
                room_type: "City View Room",
                price: 410,
                capacity: 2,
            },
            RoomSpec {
                id: "room_mum_taj_mahal_ste",
                room_type: "Sea View Suite",
                price: 780,
                capacity: 3,
            },
        ],
    },
    HotelSpec {
        id: "mum_trident",
        name: "Trident Nariman Point",
        location: "Mumbai, India",
        destination: "Mumbai",
        price: 260,
        rating: 4.5,
        description: "Marine Drive views from every upper floor.",
        amenities: &["Sea View", "Gym", "Business Centre"],
        rooms: &[
            RoomSpec {
                id: "room_mum_trident_std",
                room_type: "Superior Room",
                price: 260,
                capacity: 2,
            },
            RoomSpec {
                id: "room_mum_trident_dlx",
                room_type: "Ocean View Room",
                price: 340,
                capacity: 2,
            },
        ],
    },
    HotelSpec {
        id: "goa_taj_exotica",
        name: "Taj Exotica Resort",
        location: "Benaulim, Goa",
        destination: "Goa",
        price: 300,
        rating: 4.7,
        description: "Mediterranean-style resort on Benaulim beach.",
        amenities: &["Private Beach", "Pool", "Golf"],
        rooms: &[
            RoomSpec {
                id: "room_goa_taj_exotica_std",
                room_type: "Garden Villa Room",
                price: 300,
                capacity: 2,
            },
            RoomSpec {
                id: "room_goa_taj_exotica_ste",
                room_type: "Sunset Villa",
                price: 650,
                capacity: 4,
            },
        ],
    },
    HotelSpec {
        id: "jai_rambagh",
        name: "Rambagh Palace",
        location: "Jaipur, Rajasthan",
        destination: "Jaipur",
        price: 470,
        rating: 4.9,
        description: "Former royal residence with peacock-filled gardens.",
        amenities: &["Heritage Tours", "Pool", "Spa"],
        rooms: &[
            RoomSpec {
                id: "room_jai_rambagh_std",
                room_type: "Palace Room",
                price: 470,
                capacity: 2,
            },
            RoomSpec {
                id: "room_jai_rambagh_ste",
                room_type: "Royal Suite",
                price: 940,
                capacity: 3,
            },
        ],
    },
    HotelSpec {
        id: "udi_lake_palace",
        name: "Taj Lake Palace",
        location: "Udaipur, Rajasthan",
        destination: "Udaipur",
        price: 520,
        rating: 5.0,
        description: "Marble palace floating on Lake Pichola.",
        amenities: &["Lake View", "Boat Transfer", "Spa"],
        rooms: &[
            RoomSpec {
                id: "room_udi_lake_palace_std",
                room_type: "Luxury Room",
                price: 520,
                capacity: 2,
            },
            RoomSpec {
                id: "room_udi_lake_palace_ste",
                room_type: "Grand Royal Suite",
                price: 1100,
                capacity: 3,
            },
        ],
    },
];

fn image_for(label: &str) -> String {
    format!(
        "https://placehold.co/600x400?text={}",
        label.replace(' ', "+")
    )
}

/// Build the sample hotels and rooms
///
/// Returns fresh owned records each call; callers decide where they land.
#[must_use]
pub fn sample_catalog() -> (Vec<Hotel>, Vec<Room>) {
    let mut hotels = Vec::with_capacity(SAMPLE_HOTELS.len());
    let mut rooms = Vec::new();
    for spec in SAMPLE_HOTELS {
        let hotel_id = HotelId::new(spec.id);
        hotels.push(Hotel {
            id: hotel_id.clone(),
            name: spec.name.to_string(),
            location: spec.location.to_string(),
            location_key: LocationKey::normalize(spec.destination),
            price: spec.price,
            rating: spec.rating,
            image: image_for(spec.name),
            description: spec.description.to_string(),
            amenities: spec.amenities.iter().map(ToString::to_string).collect(),
        });
        for room in spec.rooms {
            rooms.push(Room {
                id: RoomId::new(room.id),
                hotel_id: hotel_id.clone(),
                room_type: room.room_type.to_string(),
                price: room.price,
                capacity: room.capacity,
                image: image_for(room.room_type),
            });
        }
    }
    (hotels, rooms)
}
