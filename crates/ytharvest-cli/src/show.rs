//! The `show` subcommand: print one staged-data projection.

use clap::ValueEnum;
use sqlx::PgPool;

#[derive(Debug, Clone, Copy, ValueEnum)]
pub(crate) enum Projection {
    Channels,
    Videos,
    Comments,
}

/// Prints the chosen projection of every staged document, in staging order.
///
/// # Errors
///
/// Returns an error if the projection cannot be read.
pub(crate) async fn run_show(pool: &PgPool, projection: Projection) -> anyhow::Result<()> {
    match projection {
        Projection::Channels => {
            let channels = ytharvest_db::staged_channels(pool).await?;
            for c in &channels {
                println!(
                    "{}\t{}\tsubscribers={}\tviews={}\tvideos={}",
                    c.channel_id, c.channel_name, c.subscriber_count, c.view_count, c.video_count
                );
            }
            println!("{} staged channel(s)", channels.len());
        }
        Projection::Videos => {
            let videos = ytharvest_db::staged_videos(pool).await?;
            for v in &videos {
                println!(
                    "{}\t{}\t{}\tviews={}\tlikes={}\tduration={}",
                    v.video_id,
                    v.channel_name,
                    v.title,
                    v.view_count,
                    v.like_count,
                    v.duration
                );
            }
            println!("{} staged video(s)", videos.len());
        }
        Projection::Comments => {
            let comments = ytharvest_db::staged_comments(pool).await?;
            for c in &comments {
                println!("{}\t{}\t{}\t{}", c.comment_id, c.video_id, c.author, c.text);
            }
            println!("{} staged comment(s)", comments.len());
        }
    }

    Ok(())
}
