use serde::{Deserialize, Serialize};

/// Sport a fetched player must play to be used in a round
pub const REQUIRED_SPORT: &str = "Soccer";

/// The player a round is built around. Created once per round and never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub id: String,
    pub display_name: String,
    pub last_name: Option<String>,
    pub nationality: String,
    pub team: Option<String>,
    pub position: Option<String>,
    pub portrait_image_url: String,
    pub birth_location: Option<String>,
    pub jersey_number: Option<String>,
    pub height: Option<String>,
    pub weight: Option<String>,
    pub preferred_side: Option<String>,
    pub birth_date: Option<String>,
}

/// A club the player used to play for
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormerClub {
    pub club_name: String,
    pub badge_image_url: Option<String>,
}

/// Envelope of `lookupplayer.php`
#[derive(Debug, Deserialize)]
pub struct PlayerLookupResponse {
    pub players: Option<Vec<SportsDbPlayer>>,
}

/// Envelope of `lookupformerteams.php`
#[derive(Debug, Deserialize)]
pub struct FormerTeamsResponse {
    pub formerteams: Option<Vec<SportsDbFormerTeam>>,
}

/// Raw player record as returned by TheSportsDB
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SportsDbPlayer {
    #[serde(rename = "idPlayer")]
    pub id_player: Option<String>,
    #[serde(rename = "strPlayer")]
    pub str_player: Option<String>,
    #[serde(rename = "strLastName")]
    pub str_last_name: Option<String>,
    #[serde(rename = "strNationality")]
    pub str_nationality: Option<String>,
    #[serde(rename = "strTeam")]
    pub str_team: Option<String>,
    #[serde(rename = "strPosition")]
    pub str_position: Option<String>,
    #[serde(rename = "strSport")]
    pub str_sport: Option<String>,
    #[serde(rename = "strCutout")]
    pub str_cutout: Option<String>,
    #[serde(rename = "strThumb")]
    pub str_thumb: Option<String>,
    #[serde(rename = "strBirthLocation")]
    pub str_birth_location: Option<String>,
    #[serde(rename = "strNumber")]
    pub str_number: Option<String>,
    #[serde(rename = "strHeight")]
    pub str_height: Option<String>,
    #[serde(rename = "strWeight")]
    pub str_weight: Option<String>,
    #[serde(rename = "strSide")]
    pub str_side: Option<String>,
    #[serde(rename = "dateBorn")]
    pub date_born: Option<String>,
}

/// Raw former team record as returned by TheSportsDB
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SportsDbFormerTeam {
    #[serde(rename = "strFormerTeam")]
    pub str_former_team: Option<String>,
    #[serde(rename = "strBadge")]
    pub str_badge: Option<String>,
}

/// TheSportsDB uses both `null` and `""` for missing values
fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

impl SportsDbPlayer {
    pub fn is_soccer(&self) -> bool {
        self.str_sport.as_deref() == Some(REQUIRED_SPORT)
    }

    /// Cutout image, falling back to the thumbnail
    pub fn image_url(&self) -> Option<&str> {
        [&self.str_cutout, &self.str_thumb]
            .into_iter()
            .filter_map(|url| url.as_deref())
            .find(|url| !url.trim().is_empty())
    }

    pub fn name(&self) -> &str {
        self.str_player.as_deref().unwrap_or("unknown")
    }

    /// Converts into a round player, `None` if identity, nationality or image is missing
    pub fn into_player(self) -> Option<Player> {
        let portrait_image_url = self.image_url()?.to_string();

        Some(Player {
            id: non_empty(self.id_player)?,
            display_name: non_empty(self.str_player)?,
            last_name: non_empty(self.str_last_name),
            nationality: non_empty(self.str_nationality)?,
            team: non_empty(self.str_team),
            position: non_empty(self.str_position),
            portrait_image_url,
            birth_location: non_empty(self.str_birth_location),
            jersey_number: non_empty(self.str_number),
            height: non_empty(self.str_height),
            weight: non_empty(self.str_weight),
            preferred_side: non_empty(self.str_side),
            birth_date: non_empty(self.date_born),
        })
    }
}

impl SportsDbFormerTeam {
    pub fn into_club(self) -> Option<FormerClub> {
        Some(FormerClub {
            club_name: non_empty(self.str_former_team)?,
            badge_image_url: non_empty(self.str_badge),
        })
    }
}
