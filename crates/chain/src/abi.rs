use alloy::sol;

// ─── Garment NFT (ERC-721) ──────────────────────────────────────────────────
sol! {
    #[allow(missing_docs)]
    #[derive(Debug, PartialEq, Eq)]
    #[sol(rpc)]
    contract GarmentNFT {
        event Transfer(address indexed from, address indexed to, uint256 indexed tokenId);

        function tokenURI(uint256 tokenId) external view returns (string memory);
        function garmentWeight(uint256 tokenId) external view returns (uint256);
    }
}

// ─── Garment Collection ─────────────────────────────────────────────────────
sol! {
    #[allow(missing_docs)]
    #[derive(Debug, PartialEq, Eq)]
    #[sol(rpc)]
    contract GarmentCollection {
        event CollectionMinted(
            uint256 indexed collectionId,
            address indexed designer,
            string rarity,
            uint256[] tokenIds
        );
    }
}

// ─── Garment Staking ────────────────────────────────────────────────────────
sol! {
    #[allow(missing_docs)]
    #[derive(Debug, PartialEq, Eq)]
    #[sol(rpc)]
    contract GarmentStaking {
        event Staked(address indexed owner, uint256 tokenId);
        event Unstaked(address indexed owner, uint256 tokenId);
        event RewardPaid(address indexed user, uint256 reward);
        event TokenWhitelisted(address indexed token);

        function stakerWeight(address staker) external view returns (uint256);
    }
}

// ─── Auction House ──────────────────────────────────────────────────────────
sol! {
    #[allow(missing_docs)]
    #[derive(Debug, PartialEq, Eq)]
    #[sol(rpc)]
    contract AuctionHouse {
        event AuctionCreated(uint256 indexed garmentTokenId);
        event BidPlaced(uint256 indexed garmentTokenId, address indexed bidder, uint256 bid);
        event BidWithdrawn(uint256 indexed garmentTokenId, address indexed bidder, uint256 bid);
        event AuctionResulted(
            uint256 indexed garmentTokenId,
            address indexed winner,
            uint256 winningBid
        );
        event AuctionCancelled(uint256 indexed garmentTokenId);

        function auctions(uint256 garmentTokenId)
            external
            view
            returns (uint256 reservePrice, uint256 startTime, uint256 endTime, bool resulted);
    }
}

// ─── Marketplace ────────────────────────────────────────────────────────────
sol! {
    #[allow(missing_docs)]
    #[derive(Debug, PartialEq, Eq)]
    #[sol(rpc)]
    contract Marketplace {
        event OfferCreated(uint256 indexed collectionId);
        event OfferPurchased(
            uint256 indexed collectionId,
            address indexed buyer,
            uint256 orderId,
            uint256 primarySalePrice,
            uint256 paymentAmount
        );
        event OfferCancelled(uint256 indexed collectionId);

        function offers(uint256 collectionId)
            external
            view
            returns (
                uint256 price,
                uint256 startTime,
                uint256 endTime,
                uint256 platformFee,
                uint256 discount
            );
        function lastOracleQuote() external view returns (uint256);
    }
}

// ─── Designer Registry ──────────────────────────────────────────────────────
sol! {
    #[allow(missing_docs)]
    #[derive(Debug, PartialEq, Eq)]
    #[sol(rpc)]
    contract DesignerRegistry {
        event DesignerAdded(address indexed designer, string uri);
        event DesignerRemoved(address indexed designer);
    }
}

// ─── ERC-20 (whitelisted payment/stake tokens) ──────────────────────────────
sol! {
    #[allow(missing_docs)]
    #[derive(Debug, PartialEq, Eq)]
    #[sol(rpc)]
    contract Erc20 {
        function name() external view returns (string memory);
    }
}
