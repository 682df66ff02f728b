//! The `report` subcommand: run one canned warehouse query and print rows.

use clap::ValueEnum;
use sqlx::PgPool;

#[derive(Debug, Clone, Copy, ValueEnum)]
pub(crate) enum ReportName {
    /// Every video title with its channel
    Videos,
    /// Channels ranked by number of videos
    VideoCounts,
    /// Top ten most-viewed videos per channel
    TopViewed,
    /// Collected comment totals per video
    CommentCounts,
    /// The most-liked video of each channel
    TopLiked,
    /// Like totals for every video
    Likes,
    /// Total view counts per channel
    ChannelViews,
    /// Channels that published a video in the given --year
    PublishedInYear,
    /// Average video duration per channel, in seconds
    AvgDuration,
    /// The ten videos with the most collected comments
    MostCommented,
}

/// # Errors
///
/// Returns an error if the query fails, or if `published-in-year` is run
/// without `--year`.
pub(crate) async fn run_report(
    pool: &PgPool,
    name: ReportName,
    year: Option<i32>,
) -> anyhow::Result<()> {
    match name {
        ReportName::Videos => {
            for row in ytharvest_db::videos_with_channels(pool).await? {
                println!("{}\t{}", row.channel_name, row.video_title);
            }
        }
        ReportName::VideoCounts => {
            for row in ytharvest_db::channels_by_video_count(pool).await? {
                println!("{}\t{}", row.channel_name, row.video_count);
            }
        }
        ReportName::TopViewed => {
            for row in ytharvest_db::top_viewed_videos(pool).await? {
                println!("{}\t{}\t{}", row.channel_name, row.video_title, row.view_count);
            }
        }
        ReportName::CommentCounts => {
            for row in ytharvest_db::comment_counts_per_video(pool).await? {
                let title = row.video_title.as_deref().unwrap_or("(unknown video)");
                println!("{}\t{}\t{}", row.video_id, title, row.comment_count);
            }
        }
        ReportName::TopLiked => {
            for row in ytharvest_db::top_liked_per_channel(pool).await? {
                println!("{}\t{}\t{}", row.channel_name, row.video_title, row.like_count);
            }
        }
        ReportName::Likes => {
            for row in ytharvest_db::video_likes(pool).await? {
                println!("{}\t{}", row.video_title, row.like_count);
            }
        }
        ReportName::ChannelViews => {
            for row in ytharvest_db::channel_view_totals(pool).await? {
                println!("{}\t{}", row.channel_name, row.channel_views);
            }
        }
        ReportName::PublishedInYear => {
            let year = year
                .ok_or_else(|| anyhow::anyhow!("--year is required for published-in-year"))?;
            for row in ytharvest_db::channels_published_in_year(pool, year).await? {
                println!("{}", row.channel_name);
            }
        }
        ReportName::AvgDuration => {
            for row in ytharvest_db::avg_duration_per_channel(pool).await? {
                match row.avg_duration_seconds {
                    Some(avg) => println!("{}\t{avg:.1}", row.channel_name),
                    None => println!("{}\t(no parseable durations)", row.channel_name),
                }
            }
        }
        ReportName::MostCommented => {
            for row in ytharvest_db::most_commented_videos(pool).await? {
                let title = row.video_title.as_deref().unwrap_or("(unknown video)");
                println!("{}\t{}\t{}", row.video_id, title, row.comment_count);
            }
        }
    }

    Ok(())
}
