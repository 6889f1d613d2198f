mod layout;
pub use layout::AppLayout;

mod home;
pub use home::{Home, Pokemons};

mod pokemon_detail;
pub use pokemon_detail::PokemonDetail;

mod favorites;
pub use favorites::Favorites;

mod login;
pub use login::Login;

mod register;
pub use register::Register;
