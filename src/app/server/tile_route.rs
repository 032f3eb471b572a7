use crate::{
    app::server::app_state::AppState,
    tile::{TileCoord, TileBuildError, build_tile, encode_points, parse_tile_path},
};
use axum::{
    body::Body,
    extract::{Path, State},
    http::{Response, StatusCode, header},
};
use tracing::{debug, error, info, warn};

pub(crate) async fn get(
    State(state): State<AppState>,
    Path(tile): Path<String>,
) -> Response<Body> {
    info!(tile = %tile, "tile request");

    let coord = match parse_tile_path(&tile) {
        Ok(coord) => coord,
        Err(err) => {
            warn!(tile = %tile, "invalid tile url: {err}");

            return plain_text(StatusCode::BAD_REQUEST, "Invalid tile url");
        }
    };

    let rendered = tokio::task::spawn_blocking(move || render_tile(&state, coord)).await;

    match rendered {
        Ok(Ok(data)) => Response::builder()
            .status(StatusCode::OK)
            .header(header::CONTENT_TYPE, "application/x-protobuf")
            .header(header::ACCESS_CONTROL_ALLOW_METHODS, "GET, POST, OPTIONS")
            .body(Body::from(data))
            .expect("body should be built"),
        Ok(Err(err)) => {
            error!("Build tile {coord} failed: {err}");

            plain_text(StatusCode::INTERNAL_SERVER_ERROR, "tile error")
        }
        Err(err) => {
            error!("Build tile {coord} panicked: {err}");

            plain_text(StatusCode::INTERNAL_SERVER_ERROR, "tile error")
        }
    }
}

fn render_tile(state: &AppState, coord: TileCoord) -> Result<Vec<u8>, TileBuildError> {
    let geometry = encode_points(state.points.locs(), &coord.address(), state.extent);

    debug!(%coord, points = (geometry.len() - 1) / 2, "encoded tile");

    build_tile(geometry, state.extent)
}

fn plain_text(status: StatusCode, message: &'static str) -> Response<Body> {
    Response::builder()
        .status(status)
        .header(header::CONTENT_TYPE, "text/plain; charset=utf-8")
        .body(Body::from(message))
        .expect("body should be built")
}

#[cfg(test)]
mod tests {
    use crate::{
        app::{
            points::{PointRecord, PointSet},
            server::server::router,
        },
        tile::{
            LonLat,
            vector_tile::{GeomType, Tile},
        },
    };
    use axum::{
        Router,
        body::{Body, to_bytes},
        http::{Request, StatusCode, header},
    };
    use prost::Message;
    use std::sync::Arc;
    use tower::ServiceExt;

    fn app(points: &[(f64, f64)]) -> Router {
        let records: Vec<_> = points
            .iter()
            .map(|&(lon, lat)| PointRecord {
                species: "Pinus radiata".into(),
                lon_lat: LonLat { lon, lat },
            })
            .collect();

        router(Arc::new(PointSet::new(&records)), "/tiles", 4096)
    }

    async fn get(router: Router, uri: &str) -> axum::response::Response {
        router
            .oneshot(
                Request::builder()
                    .uri(uri)
                    .header(header::ORIGIN, "https://example.com")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn serves_point_tile() {
        let response = get(app(&[(0.0, 0.0)]), "/tiles/0/0/0").await;

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[header::CONTENT_TYPE],
            "application/x-protobuf"
        );
        assert_eq!(response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
        assert_eq!(
            response.headers()[header::ACCESS_CONTROL_ALLOW_METHODS],
            "GET, POST, OPTIONS"
        );

        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();

        let tile = Tile::decode(body).unwrap();

        assert_eq!(tile.layers.len(), 1);
        assert_eq!(tile.layers[0].name, "points");
        assert_eq!(tile.layers[0].extent, Some(4096));
        assert_eq!(tile.layers[0].features[0].r#type(), GeomType::Point);
        assert_eq!(tile.layers[0].features[0].geometry, vec![9, 4096, 4096]);
    }

    #[tokio::test]
    async fn point_outside_tile_gives_empty_layer() {
        let response = get(app(&[(150.0, -70.0)]), "/tiles/1/0/0.pbf").await;

        assert_eq!(response.status(), StatusCode::OK);

        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();

        let tile = Tile::decode(body).unwrap();

        assert_eq!(tile.layers[0].features[0].geometry, vec![1]);
    }

    #[tokio::test]
    async fn malformed_path_is_bad_request() {
        for uri in ["/tiles/abc/def/ghi", "/tiles/1/2", "/tiles/99999999999/0/0"] {
            let response = get(app(&[]), uri).await;

            assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{uri}");

            let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();

            assert_eq!(&body[..], b"Invalid tile url");
        }
    }

    #[tokio::test]
    async fn serves_first_triplet_of_longer_paths() {
        for (uri, expected) in [
            ("/tiles/1/2/3/4", "/tiles/1/2/3"),
            ("/tiles/0/0/0/", "/tiles/0/0/0"),
            ("/tiles/1/2/3.png", "/tiles/1/2/3"),
        ] {
            let points = [(0.0, 0.0), (-120.0, 40.0)];

            let response = get(app(&points), uri).await;

            assert_eq!(response.status(), StatusCode::OK, "{uri}");

            let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();

            let plain = get(app(&points), expected).await;
            let plain = to_bytes(plain.into_body(), usize::MAX).await.unwrap();

            assert_eq!(body, plain, "{uri}");
        }
    }

    #[tokio::test]
    async fn unknown_route_is_not_found() {
        let response = get(app(&[]), "/other/0/0/0").await;

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn identical_requests_give_identical_bytes() {
        let points = [(-122.42, 37.77), (-122.41, 37.78), (-122.43, 37.76)];

        let first = get(app(&points), "/tiles/12/655/1583").await;
        let second = get(app(&points), "/tiles/12/655/1583").await;

        let first = to_bytes(first.into_body(), usize::MAX).await.unwrap();
        let second = to_bytes(second.into_body(), usize::MAX).await.unwrap();

        assert_eq!(first, second);
    }
}
