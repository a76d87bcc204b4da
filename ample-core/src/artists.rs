//! Artist browsing.
//!
//! Each builder turns a named intent plus a `Page` into a query descriptor and
//! forwards it to the API. Results come back unmodified and errors propagate
//! unchanged; `get_artist` is the only function that touches the result.

use crate::ampache::query::operator;
use crate::ampache::{AmpacheApi, ApiError, Artist, Rule, SearchQuery, StatsFilter, StatsQuery};
use ample_common::Page;
use std::fmt;
use std::str::FromStr;
use tracing::debug;

// -- Descriptors --

pub fn search_artists_query(query: &str, page: Page) -> SearchQuery {
    SearchQuery::artists(
        page,
        vec![Rule::text("title", operator::TEXT_CONTAINS, query)],
    )
}

/// Artists the current user has not rated, shuffled by the server
pub fn unrated_artists_query(page: Page) -> SearchQuery {
    SearchQuery::artists(
        page,
        vec![Rule::numeric("myrating", operator::NUMERIC_EQUALS, 0)],
    )
    .randomized()
}

/// Any artist, shuffled. The empty title rule matches everything.
pub fn random_artists_query(page: Page) -> SearchQuery {
    SearchQuery::artists(
        page,
        vec![Rule::text("title", operator::TEXT_CONTAINS, "")],
    )
    .randomized()
}

/// Artists owning at least one album, shuffled
pub fn random_album_artists_query(page: Page) -> SearchQuery {
    SearchQuery::artists(
        page,
        vec![Rule::numeric(
            "album_count",
            operator::NUMERIC_GREATER_THAN,
            0,
        )],
    )
    .randomized()
}

pub fn stats_artists_query(filter: StatsFilter, page: Page) -> StatsQuery {
    StatsQuery::artists(filter, page)
}

// -- Builders --

async fn search<A: AmpacheApi + ?Sized>(
    api: &A,
    query: SearchQuery,
) -> Result<Vec<Artist>, ApiError> {
    debug!(
        "advanced_search artists offset={} limit={} rules={}",
        query.offset,
        query.limit,
        query.rules.len()
    );
    api.advanced_search(&query).await
}

async fn stats<A: AmpacheApi + ?Sized>(
    api: &A,
    filter: StatsFilter,
    page: Page,
) -> Result<Vec<Artist>, ApiError> {
    let query = stats_artists_query(filter, page);
    debug!(
        "stats artists filter={} offset={} limit={}",
        filter.as_str(),
        query.offset,
        query.limit
    );
    api.stats(&query).await
}

/// Artists whose title contains `query`
pub async fn search_artists<A: AmpacheApi + ?Sized>(
    api: &A,
    query: &str,
    page: Page,
) -> Result<Vec<Artist>, ApiError> {
    search(api, search_artists_query(query, page)).await
}

pub async fn unrated_artists<A: AmpacheApi + ?Sized>(
    api: &A,
    page: Page,
) -> Result<Vec<Artist>, ApiError> {
    search(api, unrated_artists_query(page)).await
}

pub async fn random_artists<A: AmpacheApi + ?Sized>(
    api: &A,
    page: Page,
) -> Result<Vec<Artist>, ApiError> {
    search(api, random_artists_query(page)).await
}

pub async fn random_album_artists<A: AmpacheApi + ?Sized>(
    api: &A,
    page: Page,
) -> Result<Vec<Artist>, ApiError> {
    search(api, random_album_artists_query(page)).await
}

pub async fn newest_artists<A: AmpacheApi + ?Sized>(
    api: &A,
    page: Page,
) -> Result<Vec<Artist>, ApiError> {
    stats(api, StatsFilter::Newest, page).await
}

/// Recently played
pub async fn recent_artists<A: AmpacheApi + ?Sized>(
    api: &A,
    page: Page,
) -> Result<Vec<Artist>, ApiError> {
    stats(api, StatsFilter::Recent, page).await
}

pub async fn favorite_artists<A: AmpacheApi + ?Sized>(
    api: &A,
    page: Page,
) -> Result<Vec<Artist>, ApiError> {
    stats(api, StatsFilter::Flagged, page).await
}

pub async fn frequent_artists<A: AmpacheApi + ?Sized>(
    api: &A,
    page: Page,
) -> Result<Vec<Artist>, ApiError> {
    stats(api, StatsFilter::Frequent, page).await
}

/// Top rated
pub async fn top_artists<A: AmpacheApi + ?Sized>(
    api: &A,
    page: Page,
) -> Result<Vec<Artist>, ApiError> {
    stats(api, StatsFilter::Highest, page).await
}

pub async fn forgotten_artists<A: AmpacheApi + ?Sized>(
    api: &A,
    page: Page,
) -> Result<Vec<Artist>, ApiError> {
    stats(api, StatsFilter::Forgotten, page).await
}

/// Fetch one artist and count the albums it appears on without owning.
///
/// The album lookup is filtered by the id the server returned, which may
/// differ from `id`. `appearance_count` is `albums - albumcount` with no
/// clamping, so it goes negative when the server lists fewer associations
/// than the artist owns.
pub async fn get_artist<A: AmpacheApi + ?Sized>(api: &A, id: &str) -> Result<Artist, ApiError> {
    let mut artist = api.artist(id).await?;

    let appearances = api.artist_albums(&artist.id).await?;
    artist.appearance_count = Some(appearances.len() as i64 - artist.albumcount);

    debug!(
        "artist {} owns {} albums, appears on {}",
        artist.id,
        artist.albumcount,
        appearances.len()
    );
    Ok(artist)
}

/// Named paged artist listings, as offered by the browse views.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArtistBrowse {
    Unrated,
    Newest,
    Recent,
    Favorite,
    Frequent,
    Top,
    Forgotten,
    Random,
    RandomAlbumArtists,
}

impl ArtistBrowse {
    pub const ALL: [ArtistBrowse; 9] = [
        ArtistBrowse::Unrated,
        ArtistBrowse::Newest,
        ArtistBrowse::Recent,
        ArtistBrowse::Favorite,
        ArtistBrowse::Frequent,
        ArtistBrowse::Top,
        ArtistBrowse::Forgotten,
        ArtistBrowse::Random,
        ArtistBrowse::RandomAlbumArtists,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ArtistBrowse::Unrated => "unrated",
            ArtistBrowse::Newest => "newest",
            ArtistBrowse::Recent => "recent",
            ArtistBrowse::Favorite => "favorite",
            ArtistBrowse::Frequent => "frequent",
            ArtistBrowse::Top => "top",
            ArtistBrowse::Forgotten => "forgotten",
            ArtistBrowse::Random => "random",
            ArtistBrowse::RandomAlbumArtists => "random-album-artists",
        }
    }

    pub async fn run<A: AmpacheApi + ?Sized>(
        &self,
        api: &A,
        page: Page,
    ) -> Result<Vec<Artist>, ApiError> {
        match self {
            ArtistBrowse::Unrated => unrated_artists(api, page).await,
            ArtistBrowse::Newest => newest_artists(api, page).await,
            ArtistBrowse::Recent => recent_artists(api, page).await,
            ArtistBrowse::Favorite => favorite_artists(api, page).await,
            ArtistBrowse::Frequent => frequent_artists(api, page).await,
            ArtistBrowse::Top => top_artists(api, page).await,
            ArtistBrowse::Forgotten => forgotten_artists(api, page).await,
            ArtistBrowse::Random => random_artists(api, page).await,
            ArtistBrowse::RandomAlbumArtists => random_album_artists(api, page).await,
        }
    }
}

impl fmt::Display for ArtistBrowse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ArtistBrowse {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ArtistBrowse::ALL
            .iter()
            .find(|b| b.as_str() == s)
            .copied()
            .ok_or_else(|| {
                let names: Vec<&str> = ArtistBrowse::ALL.iter().map(|b| b.as_str()).collect();
                format!(
                    "unknown artist listing '{}', expected one of: {}",
                    s,
                    names.join(", ")
                )
            })
    }
}
